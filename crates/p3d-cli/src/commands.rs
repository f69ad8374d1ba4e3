use std::path::{Path, PathBuf};
use std::time::Duration;

use colored::Colorize;
use p3d_container::FileContainerIo;
use p3d_merge::{Invocation, MergeConfig, MergePipeline, MergeReport};

use crate::cli::Cli;
use crate::validate::{check_inputs, check_output};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let base = match &cli.config {
        Some(path) => MergeConfig::load(path)?,
        None => MergeConfig::default(),
    };
    let config = cli.merge_config(base);

    let inputs = check_inputs(&cli.inputs)?;
    let output = check_output(&cli.output)?;
    print_settings(&inputs, &output, &config);
    for warning in config.warnings() {
        println!("{} {}", "!".yellow().bold(), warning.to_string().yellow());
    }

    let io = FileContainerIo;
    let mut pipeline = MergePipeline::new(config, &io).with_invocation(Invocation::from_env());
    let report = pipeline.run(&inputs, &output)?;
    print_report(&report, &output);
    Ok(())
}

fn print_settings(inputs: &[PathBuf], output: &Path, config: &MergeConfig) {
    let joined: Vec<String> = inputs.iter().map(|p| p.display().to_string()).collect();
    println!("Input Paths: {}", joined.join("; ").bold());
    println!("Output Path: {}", output.display().to_string().bold());
    println!("Force: {}", flag(config.force_overwrite));
    println!("No History: {}", flag(config.skip_history));
    println!("Sort: {}", flag(config.sort.enabled));
    if config.sort.enabled {
        println!("  Alphabetical: {}", flag(config.sort.alphabetical));
        println!("  Include Section Headers: {}", flag(config.sort.include_section_headers));
    }
    println!("Dedupe: {}", flag(config.dedupe));
    println!("Compress: {}", flag(config.compress));
}

fn print_report(report: &MergeReport, output: &Path) {
    println!(
        "{} Merged {} file(s) into {}",
        "✓".green().bold(),
        report.inputs,
        output.display().to_string().bold()
    );
    println!("  Chunks read: {}", report.chunks_read);
    println!("  Chunks written: {}", report.chunks_written);
    if report.duplicates_skipped > 0 {
        println!("  Duplicates skipped: {}", report.duplicates_skipped.to_string().cyan());
    }
    if report.section_headers > 0 {
        println!("  Section headers: {}", report.section_headers);
    }
    if report.history_added {
        println!("  History: {}", "added".green());
    }
    if report.compressed {
        println!("  Compression: {}", "on".green());
    }
    println!("Process finished in {}.", format_elapsed(report.elapsed));
}

fn flag(value: bool) -> colored::ColoredString {
    if value {
        "yes".green()
    } else {
        "no".dimmed()
    }
}

/// Format a duration as `hh:mm:ss.fff`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    let (secs, millis) = (millis / 1000, millis % 1000);
    let (mins, secs) = (secs / 60, secs % 60);
    let (hours, mins) = (mins / 60, mins % 60);
    format!("{hours:02}:{mins:02}:{secs:02}.{millis:03}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use p3d_container::{Container, ContainerIo};
    use std::ffi::OsStr;

    fn parse(args: &[&OsStr]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn elapsed_format() {
        assert_eq!(format_elapsed(Duration::from_millis(0)), "00:00:00.000");
        assert_eq!(format_elapsed(Duration::from_millis(1_234)), "00:00:01.234");
        assert_eq!(format_elapsed(Duration::from_millis(3_723_045)), "01:02:03.045");
    }

    #[test]
    fn end_to_end_merge() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.p3d");
        let out = dir.path().join("out.p3d");
        let io = FileContainerIo;
        io.write(&Container::new(), &a, false).unwrap();

        let cli = parse(&[
            OsStr::new("p3dtool"),
            OsStr::new("-d"),
            OsStr::new("-i"),
            a.as_os_str(),
            OsStr::new("-i"),
            a.as_os_str(),
            OsStr::new("-o"),
            out.as_os_str(),
        ]);
        run_command(cli).unwrap();

        let merged = io.load(&out).unwrap();
        assert_eq!(merged.len(), 1);
        assert!(merged.chunks()[0].tag().is_history());
    }

    #[test]
    fn existing_output_without_force_fails() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.p3d");
        let out = dir.path().join("out.p3d");
        let io = FileContainerIo;
        io.write(&Container::new(), &a, false).unwrap();
        std::fs::write(&out, b"keep me").unwrap();

        let cli = parse(&[
            OsStr::new("p3dtool"),
            OsStr::new("-i"),
            a.as_os_str(),
            OsStr::new("-o"),
            out.as_os_str(),
        ]);
        let err = run_command(cli).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(std::fs::read(&out).unwrap(), b"keep me");
    }
}
