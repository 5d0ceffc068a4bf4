//! Splitter behavior over whole scripts: lossless partition, statement
//! bodies, gap commentary and marker classification.

use folio_conformance::{make_config, split_default, split_with_config, split_with_markers};
use folio_script::{Markers, SegmentKind};
use proptest::prelude::*;

const LITERATE: &str = r#"# # Plotting a sine wave
#
# We start with the imports.

import math
from typing import List

# A helper that samples the function.
# ~~~python
# samples(8)
# ~~~


@cache
def samples(n: int) -> List[float]:
    """Return `n` evenly spaced samples."""
    step = 2 * math.pi / n

    return [math.sin(i * step) for i in range(n)]
    # end of samples


class Plot:
    width = 80

    def draw(self, values):
        for v in values:
            print("*" * int(v * self.width))


if __name__ == "__main__":
    Plot().draw(samples(16))
else:
    pass
# Done.
"#;

const CORPUS: &[&str] = &[
    "",
    "\n",
    "\n\n\n",
    "x",
    "x = 1",
    "# only a comment",
    "# a\r\n# b\r\n",
    "a=1\n# note\nb=2\n",
    "a = 1; b = 2\n",
    "def f():\r\n    return 1\r\n\r\n# after\r\nf()",
    "s = '''\n# not a comment\n'''\n# real comment\n",
    "x = [\n    1,  # one\n    2,\n]\ny = {\n}\n",
    "if a:\n    pass\nelif b:\n    pass\nelse:\n    pass\n",
    "try:\n    x()\nexcept ValueError as e:\n    raise\nfinally:\n    done()\n",
    "async def f():\n    async with a as b:\n        await b\n",
    "total = 1 + \\\n    2\n",
    LITERATE,
];

#[test]
fn raw_partition_reproduces_every_source() {
    for source in CORPUS {
        let result = split_default(source).unwrap();
        assert_eq!(&result.raw.concat(), source, "source {source:?}");
    }
}

/// Units that generated scripts are assembled from. Each one parses on its
/// own and after any other unit.
const UNITS: &[&str] = &[
    "x = 1",
    "print(x)",
    "def f():\n    return 1",
    "if x:\n    y = 2\n\n    # inner\nelse:\n    pass",
    "s = '''\n# inside\n'''",
    "x = [\n  1,\n]",
    "",
    "   ",
    "#",
    "# note",
    "    # indented note",
    "# # Heading",
    "# ~~~",
    "# ```python",
];

fn arb_source() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(prop::sample::select(UNITS), 0..12),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(units, crlf, trailing)| {
            let newline = if crlf { "\r\n" } else { "\n" };
            let mut source = units.join("\n").replace('\n', newline);
            if trailing && !source.is_empty() {
                source.push_str(newline);
            }
            source
        })
}

proptest! {
    #[test]
    fn raw_partition_reproduces_generated_sources(source in arb_source()) {
        let result = split_default(&source).unwrap();
        prop_assert_eq!(result.raw.concat(), source.clone());
        prop_assert!(result.raw.iter().all(|piece| !piece.is_empty()));
        prop_assert!(result.segments.len() <= source.lines().count());
    }
}

#[test]
fn statement_free_sources_are_verbatim_comments() {
    for source in ["# one\n#\n# # two\n", "\n\n", "# ~~~\n# open fence\n"] {
        let result = split_default(source).unwrap();
        let lines: Vec<&str> = source.lines().collect();
        assert_eq!(result.segments.len(), lines.len());
        for ((kind, text), line) in result.segments.iter().zip(lines) {
            assert_eq!(*kind, SegmentKind::Comment);
            assert_eq!(text, line);
        }
        assert!(!result.unterminated_escape);
    }
}

#[test]
fn empty_source_yields_nothing() {
    let result = split_default("").unwrap();
    assert!(result.segments.is_empty());
    assert!(result.raw.is_empty());
}

#[test]
fn escape_run_example() {
    let markers = Markers::new(None, "^# #", r"^#\s?").unwrap();
    let result = split_with_markers("# #title\ntext\n# #end\n", &markers).unwrap();
    assert_eq!(
        result.segments,
        vec![
            (SegmentKind::Escape, "# #title".to_string()),
            (SegmentKind::Escape, "text".to_string()),
            (SegmentKind::Escape, "# #end".to_string()),
        ]
    );
}

#[test]
fn backward_absorb_example() {
    let result = split_default("a=1\n# note\nb=2\n").unwrap();
    assert_eq!(result.raw, vec!["a=1\n", "# note\n", "b=2\n"]);
    assert_eq!(
        result.segments,
        vec![
            (SegmentKind::Code, "a=1".to_string()),
            (SegmentKind::Comment, "note".to_string()),
            (SegmentKind::Code, "b=2".to_string()),
        ]
    );
}

#[test]
fn literate_script_segments() {
    let result = split_default(LITERATE).unwrap();
    let kinds = result.kinds();
    let expected = vec![
        SegmentKind::Escape,  // # # Plotting a sine wave
        SegmentKind::Comment, // We start with the imports.
        SegmentKind::Code,    // blank
        SegmentKind::Code,    // import math
        SegmentKind::Code,    // from typing import List
        SegmentKind::Code,    // blank
        SegmentKind::Comment, // A helper that samples the function.
        SegmentKind::Escape,  // # ~~~python
        SegmentKind::Escape,  // # samples(8)
        SegmentKind::Escape,  // # ~~~
        SegmentKind::Code,    // blank
        SegmentKind::Code,    // blank
        SegmentKind::Code,    // @cache def samples ... # end of samples
        SegmentKind::Code,    // blank
        SegmentKind::Code,    // blank
        SegmentKind::Code,    // class Plot
        SegmentKind::Code,    // blank
        SegmentKind::Code,    // blank
        SegmentKind::Code,    // if __name__ ... else: pass
        SegmentKind::Comment, // Done.
    ];
    assert_eq!(kinds, expected);
    assert!(!result.unterminated_escape);

    let samples = &result.segments[12].1;
    assert!(samples.starts_with("@cache\ndef samples"));
    assert!(samples.ends_with("range(n)]\n    # end of samples"));
    assert!(samples.contains("\n\n    return"));
    assert!(result.segments[18].1.ends_with("else:\n    pass"));
    assert_eq!(result.segments[19].1, "Done.");
}

#[test]
fn triple_quoted_hash_lines_stay_code() {
    let result = split_default("s = '''\n# not a comment\n'''\n# real comment\n").unwrap();
    assert_eq!(
        result.segments,
        vec![
            (SegmentKind::Code, "s = '''\n# not a comment\n'''".to_string()),
            (SegmentKind::Comment, "real comment".to_string()),
        ]
    );
}

#[test]
fn bracket_continuation_is_one_statement() {
    let result = split_default("x = [\n    1,  # one\n    2,\n]\ny = {\n}\n").unwrap();
    assert_eq!(result.kinds(), vec![SegmentKind::Code, SegmentKind::Code]);
}

#[test]
fn configured_markers_drive_classification() {
    let config = make_config(
        r#"
[script]
header = ""
escape = "^#\\s*BEGIN"
comment = "^#+\\s?"
"#,
    );
    let source = "## Heading\n# BEGIN raw\nx = 1\n# END\n# BEGIN again\ny = 2\n";
    let result = split_with_config(source, &config).unwrap();
    assert_eq!(
        result.segments,
        vec![
            (SegmentKind::Comment, "Heading".to_string()),
            (SegmentKind::Escape, "# BEGIN raw".to_string()),
            (SegmentKind::Escape, "x = 1".to_string()),
            // Not the opening marker text, so the run stays open.
            (SegmentKind::Escape, "# END".to_string()),
            (SegmentKind::Escape, "# BEGIN again".to_string()),
            (SegmentKind::Code, "y = 2".to_string()),
        ]
    );
    assert!(!result.unterminated_escape);
}

#[test]
fn open_fence_runs_to_end_of_input() {
    let result = split_default("x = 1\n# ```\ny = 2\n").unwrap();
    assert_eq!(
        result.kinds(),
        vec![SegmentKind::Code, SegmentKind::Escape, SegmentKind::Escape]
    );
    assert!(result.unterminated_escape);
}

#[test]
fn parse_errors_produce_no_segments() {
    let sources = [
        "x = (\n",
        "  x = 1\n",
        "else:\n    pass\n",
        "@dec\nx = 1\n",
        "s = 'a\n",
        "x = = 1\n",
        "def\n",
        "1 +\n",
        "import\n",
        "class :\n    pass\n",
        "for in:\n    pass\n",
        "def f():\n    pass\n  x = 1\n",
    ];
    for source in sources {
        assert!(split_default(source).is_err(), "source {source:?}");
    }
}
