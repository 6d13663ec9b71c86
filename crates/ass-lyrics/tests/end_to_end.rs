//! Full pipeline tests: parse, resolve, generate and write

use ass_lyrics::analysis::{EstimatedMetrics, FontSpec, TextExtents, TextMetrics};
use ass_lyrics::{
    generate, resolve_lines, CoreError, LayoutConfig, LayoutGenerator, Script, ScriptWriter,
    WriteOptions,
};
use pretty_assertions::assert_eq;

const LYRICS: &str = "[Script Info]
Title: Karaoke
PlayResX: 1280
PlayResY: 720

[V4+ Styles]
Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding
Style: Default,Arial,40,&H00FFFFFF,&H000000FF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,0,5,0,0,0,1
Style: MainStyle,Arial,40,&H00FFFFFF,&H000000FF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,0,5,0,0,0,1
Style: SubStyle,Arial,40,&H00FFFFFF,&H000000FF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,0,5,0,0,0,1

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
Comment: 0,0:00:00.00,0:00:01.00,Default,,0,0,0,,intro
Dialogue: 0,0:00:01.00,0:00:03.00,Default,,0,0,0,,{\\k50}one
Dialogue: 0,0:00:03.00,0:00:05.00,Default,Alice,0,0,0,,{\\k50}two
Dialogue: 0,0:00:05.00,0:00:07.00,Default,,0,0,0,,{\\k50}three
";

/// Fixed-size metrics so positions are easy to predict
struct BoxMetrics;

impl TextMetrics for BoxMetrics {
    fn measure(&self, _text: &str, font: &FontSpec) -> TextExtents {
        TextExtents {
            width: 100.0,
            height: font.size,
        }
    }
}

#[test]
fn full_pipeline() {
    let script = Script::parse(LYRICS).unwrap();
    let lines = resolve_lines(&script, &BoxMetrics).unwrap();
    assert_eq!(lines.len(), 3);
    assert!((lines[0].geometry.center - 640.0).abs() < 1e-9);
    assert!((lines[0].geometry.middle - 360.0).abs() < 1e-9);

    let generator = LayoutGenerator::new(LayoutConfig::default()).unwrap();
    let mut writer = ScriptWriter::new(&script, WriteOptions::default());
    let stats = generate(&generator, &lines, &mut writer).unwrap();

    // previous: 0+1+2, next: 2+1+0
    assert_eq!(stats.current, 3);
    assert_eq!(stats.previous, 3);
    assert_eq!(stats.next, 3);
    assert_eq!(
        writer.missing_styles(),
        vec![
            ("MainStyle-Alice".to_string(), 1),
            ("SubStyle-Alice".to_string(), 2)
        ]
    );

    let output = writer.finish();
    let generated: Vec<&str> = output
        .lines()
        .filter(|line| line.starts_with("Dialogue:"))
        .collect();

    assert_eq!(
        generated,
        vec![
            "Dialogue: 0,0:00:01.00,0:00:03.00,MainStyle,,0000,0000,0000,,{\\an5\\fscx100\\fscy100\\pos(640.000,360.000)}{\\k50}one",
            "Dialogue: 3,0:00:01.00,0:00:03.00,SubStyle-Alice,Alice,0000,0000,0000,,{\\an5\\fscx70\\fscy70\\pos(640.000,400.000)}{\\k50}two",
            "Dialogue: 4,0:00:01.00,0:00:03.00,MainStyle,,0000,0000,0000,,{\\an5\\fscx100\\fscy100\\pos(640.000,440.000)}{\\k50}three",
            "Dialogue: 1,0:00:03.00,0:00:05.00,SubStyle,,0000,0000,0000,,{\\an5\\fscx70\\fscy70\\move(640.000,360.000,640.000,320.000,0,300)\\fade(0,128,128,0,300,300,300)}{\\k50}one",
            "Dialogue: 0,0:00:03.00,0:00:05.00,MainStyle-Alice,Alice,0000,0000,0000,,{\\an5\\fscx100\\fscy100\\move(640.000,400.000,640.000,360.000,0,300)}{\\k50}two",
            "Dialogue: 3,0:00:03.00,0:00:05.00,MainStyle,,0000,0000,0000,,{\\an5\\fscx100\\fscy100\\move(640.000,440.000,640.000,400.000,0,300)}{\\k50}three",
            "Dialogue: 1,0:00:05.00,0:00:07.00,SubStyle-Alice,Alice,0000,0000,0000,,{\\an5\\fscx70\\fscy70\\move(640.000,360.000,640.000,320.000,0,300)\\fade(0,128,128,0,300,300,300)}{\\k50}two",
            "Dialogue: 2,0:00:05.00,0:00:07.00,SubStyle,,0000,0000,0000,,{\\an5\\fscx70\\fscy70\\move(640.000,320.000,640.000,280.000,0,300)\\fade(191,191,255,0,300,1700,2000)}{\\k50}one",
            "Dialogue: 0,0:00:05.00,0:00:07.00,MainStyle,,0000,0000,0000,,{\\an5\\fscx100\\fscy100\\move(640.000,400.000,640.000,360.000,0,300)}{\\k50}three",
        ]
    );

    assert!(output.contains("Comment: 0,0:00:00.00,0:00:01.00,Default,,0,0,0,,intro"));
    assert!(output.contains("Comment: 0,0:00:01.00,0:00:03.00,Default,,0,0,0,,{\\k50}one"));
    assert!(output.starts_with("[Script Info]\nTitle: Karaoke\n"));
}

#[test]
fn drop_original_removes_source_dialogue() {
    let script = Script::parse(LYRICS).unwrap();
    let lines = resolve_lines(&script, &EstimatedMetrics::default()).unwrap();
    let generator = LayoutGenerator::new(LayoutConfig::default()).unwrap();
    let mut writer = ScriptWriter::new(
        &script,
        WriteOptions {
            keep_original: false,
        },
    );
    generate(&generator, &lines, &mut writer).unwrap();
    let output = writer.finish();

    assert!(!output.contains(",Default,,0,0,0,,{\\k50}one"));
    assert!(output.contains("intro"));
    assert_eq!(output.lines().filter(|l| l.starts_with("Dialogue:")).count(), 9);
}

#[test]
fn unknown_style_fails_before_generation() {
    let source = LYRICS.replace(
        "0:00:05.00,0:00:07.00,Default",
        "0:00:05.00,0:00:07.00,Missing",
    );
    let script = Script::parse(&source).unwrap();
    let err = resolve_lines(&script, &EstimatedMetrics::default()).unwrap_err();
    assert!(matches!(err, CoreError::UnknownStyle { ref name, line: 17 } if name == "Missing"));
}

#[test]
fn malformed_event_is_a_parse_error() {
    let source = format!("{LYRICS}Dialogue: 0,0:00:07.00\n");
    let err = Script::parse(&source).unwrap_err();
    assert!(matches!(err, CoreError::Parse(_)));
}
