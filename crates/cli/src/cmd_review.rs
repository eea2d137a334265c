// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Review command implementation.

use anyhow::Context;
use termcolor::StandardStream;

use revet::analyze::{Analyzer, ChangeSource};
use revet::cli::{Cli, OutputFormat, ReviewArgs};
use revet::config;
use revet::error::ExitCode;
use revet::git::{self, GitChanges};
use revet::output::text::TextFormatter;
use revet::output::{FormatOptions, json, markdown, resolve_color};
use revet::reader::FileReader;
use revet::report;

/// Run the review command.
pub fn run(cli: &Cli, args: &ReviewArgs) -> anyhow::Result<ExitCode> {
    if args.color && args.no_color {
        eprintln!("--color and --no-color cannot be used together");
        return Ok(ExitCode::ConfigError);
    }

    let start = super::start_dir(cli)?;
    // Not a repository is the one fatal failure class: no report at all.
    let root = git::discover_root(&start)?;

    let config_path = cli.config.clone().or_else(|| config::find_config(&root));
    let config = match &config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            config::load_with_warnings(path)?
        }
        None => {
            tracing::debug!("no config found, using defaults");
            config::Config::default()
        }
    };

    let ignore = config.project.ignore.build_matcher()?;
    let changes = GitChanges::open(&root, args.base.as_deref())?;
    let files = FileReader::new(&root);
    let analyzer = Analyzer::new(&config);

    let changed = changes
        .changed_files()
        .context("failed to list changed files")?;
    tracing::debug!(count = changed.len(), "changed files");

    let mut analyses = Vec::with_capacity(changed.len());
    for path in &changed {
        if ignore.is_match(path.as_str()) {
            tracing::debug!(path = %path, "skipped by ignore pattern");
            continue;
        }
        analyses.push(analyzer.analyze_file(path, &changes, &files));
    }

    let report = report::aggregate(&config.project, analyses);

    let options = if args.no_limit {
        FormatOptions::no_limit()
    } else {
        FormatOptions::with_limit(args.limit)
    };

    match args.output {
        OutputFormat::Text => {
            let stream = StandardStream::stdout(resolve_color(args.color, args.no_color));
            let mut formatter = TextFormatter::new(stream, options);
            formatter.write_report(&report)?;
        }
        OutputFormat::Json => {
            json::write_report(std::io::stdout().lock(), &report)?;
        }
        OutputFormat::Markdown => {
            print!("{}", markdown::render(&report));
        }
    }

    Ok(if report.passed {
        ExitCode::Success
    } else {
        ExitCode::ReviewFailed
    })
}
