//! `ass-lyrics`: turn a timed karaoke ASS file into a scrolling lyric display
//!
//! Reads the input script, stacks every lyric line with its neighbours and
//! writes the result next to the input as `<stem>_modified.<ext>` unless
//! `--output` says otherwise.

mod config;

use anyhow::{Context, Result};
use ass_lyrics::{
    generate, resolve_lines, CoreError, EstimatedMetrics, GenerationStats, LayoutGenerator,
    Script, ScriptWriter,
};
use clap::{ArgAction, Parser};
use log::{info, warn, LevelFilter};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Scrolling karaoke lyric generator for ASS subtitles
#[derive(Parser, Debug)]
#[command(name = "ass-lyrics", author, version, about, long_about = None)]
struct Cli {
    /// Input ASS file
    #[arg(short, long)]
    input: PathBuf,

    /// Output file (defaults to `<stem>_modified.<ext>` next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML settings file with `[layout]` and `[output]` tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of previous lines stacked above the current one
    #[arg(long)]
    prev_lines: Option<usize>,

    /// Number of upcoming lines stacked below the current one
    #[arg(long)]
    next_lines: Option<usize>,

    /// Drop the source dialogue instead of keeping it as comments
    #[arg(long)]
    drop_original: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }
}

/// `dir/name.ext` becomes `dir/name_modified.ext`
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{stem}_modified.{}", ext.to_string_lossy()),
        None => format!("{stem}_modified"),
    };
    input.with_file_name(name)
}

fn run(cli: &Cli) -> Result<(PathBuf, GenerationStats)> {
    let mut settings = config::load(cli.config.as_deref())?;
    settings.apply_overrides(cli.prev_lines, cli.next_lines, cli.drop_original);

    let source = fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    let script = Script::parse(&source)
        .with_context(|| format!("Failed to parse {}", cli.input.display()))?;
    script.require_events()?;

    let lines = resolve_lines(&script, &EstimatedMetrics::default())
        .with_context(|| format!("Failed to lay out {}", cli.input.display()))?;
    let generator = LayoutGenerator::new(settings.layout)?;

    let mut writer = ScriptWriter::new(&script, settings.output);
    let stats = generate(&generator, &lines, &mut writer)?;
    for (style, count) in writer.missing_styles() {
        warn!("style '{style}' used by {count} generated lines is not defined in the input");
    }

    let output = cli.output_path();
    fs::write(&output, writer.finish())
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok((output, stats))
}

/// Hint attached to the first library error in `err`'s chain
fn error_hint(err: &anyhow::Error) -> Option<&'static str> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<CoreError>())
        .and_then(CoreError::suggestion)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .format_timestamp(None)
        .parse_default_env()
        .init();

    match run(&cli) {
        Ok((output, stats)) => {
            info!(
                "wrote {} lines for {} lyrics to {}",
                stats.total(),
                stats.contexts,
                output.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            if let Some(hint) = error_hint(&err) {
                eprintln!("Hint: {hint}");
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const LYRICS: &str = "[Script Info]
PlayResX: 1280
PlayResY: 720

[V4+ Styles]
Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding
Style: Default,Arial,40,&H00FFFFFF,&H000000FF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,0,5,10,10,10,1

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
Dialogue: 0,0:00:01.00,0:00:03.00,Default,,0,0,0,,{\\k100}first
Dialogue: 0,0:00:03.00,0:00:05.00,Default,,0,0,0,,{\\k100}second
";

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("ass-lyrics").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn input_is_required() {
        let err = Cli::try_parse_from(["ass-lyrics"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn verbosity_flags() {
        assert_eq!(cli(&["-i", "a.ass"]).log_level(), LevelFilter::Info);
        assert_eq!(cli(&["-i", "a.ass", "-vv"]).log_level(), LevelFilter::Trace);
        assert_eq!(cli(&["-i", "a.ass", "-q"]).log_level(), LevelFilter::Error);
        assert!(Cli::try_parse_from(["ass-lyrics", "-i", "a.ass", "-q", "-v"]).is_err());
    }

    #[test]
    fn output_path_derivation() {
        assert_eq!(
            default_output_path(Path::new("songs/track.ass")),
            PathBuf::from("songs/track_modified.ass")
        );
        assert_eq!(
            default_output_path(Path::new("lyrics.v2.ssa")),
            PathBuf::from("lyrics.v2_modified.ssa")
        );
        assert_eq!(
            default_output_path(Path::new("noext")),
            PathBuf::from("noext_modified")
        );
        assert_eq!(
            cli(&["-i", "a.ass", "-o", "out.ass"]).output_path(),
            PathBuf::from("out.ass")
        );
    }

    #[test]
    fn end_to_end_run() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("song.ass");
        fs::write(&input, LYRICS).unwrap();

        let args = cli(&["--input", input.to_str().unwrap(), "--next-lines", "1"]);
        let (output, stats) = run(&args).unwrap();

        assert_eq!(output, dir.path().join("song_modified.ass"));
        assert_eq!(stats.current, 2);
        assert_eq!(stats.previous, 1);
        assert_eq!(stats.next, 1);

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("Comment: 0,0:00:01.00,0:00:03.00,Default,,0,0,0,,{\\k100}first"));
        assert_eq!(
            written.lines().filter(|line| line.starts_with("Dialogue:")).count(),
            4
        );
    }

    #[test]
    fn config_file_and_drop_original() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("song.ass");
        let settings = dir.path().join("settings.toml");
        let output = dir.path().join("out.ass");
        fs::write(&input, LYRICS).unwrap();
        fs::write(&settings, "[layout]\nmain_scale = 120\n").unwrap();

        let args = cli(&[
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "-c",
            settings.to_str().unwrap(),
            "--drop-original",
        ]);
        run(&args).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("\\fscx120\\fscy120"));
        assert!(!written.contains("Comment:"));
    }

    #[test]
    fn missing_input_file_fails() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("missing.ass");
        let err = run(&cli(&["-i", input.to_str().unwrap()])).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
        assert!(!dir.path().join("missing_modified.ass").exists());
    }

    #[test]
    fn unknown_style_fails_without_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("bad.ass");
        fs::write(&input, LYRICS.replace(",Default,,0,0,0,,{\\k100}second", ",Nope,,0,0,0,,x")).unwrap();

        let err = run(&cli(&["-i", input.to_str().unwrap()])).unwrap_err();
        assert!(format!("{err:#}").contains("Unknown style 'Nope'"));
        assert!(!dir.path().join("bad_modified.ass").exists());
        assert_eq!(
            error_hint(&err),
            Some("Add the style to [V4+ Styles] or fix the event's Style field")
        );
    }

    #[test]
    fn hints_follow_the_error_kind() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("missing.ass");
        let err = run(&cli(&["-i", input.to_str().unwrap()])).unwrap_err();
        assert_eq!(error_hint(&err), None);

        let input = dir.path().join("late.ass");
        fs::write(&input, LYRICS.replace("0:00:05.00", "0:00:75.00")).unwrap();
        let err = run(&cli(&["-i", input.to_str().unwrap()])).unwrap_err();
        assert_eq!(error_hint(&err), Some("ASS times use the H:MM:SS.CC format"));
    }
}
