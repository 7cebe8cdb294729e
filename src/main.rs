//! CLI entry point.
//!
//! Analyzes a plain-text resume file and prints the full report as JSON.
//! An optional second argument supplies a job context JSON file with
//! required/preferred skills and a target experience figure.

use std::process::ExitCode;

use resume_insight::{analyze, JobContext, LayoutSignals, RawDocument, SourceInfo};

fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let mut args = std::env::args().skip(1);
    let resume_path = match args.next() {
        Some(p) => p,
        None => {
            eprintln!("usage: resume_insight <resume.txt> [job.json]");
            return ExitCode::FAILURE;
        }
    };

    let text = match std::fs::read_to_string(&resume_path) {
        Ok(t) => t,
        Err(err) => {
            eprintln!("cannot read {resume_path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let job = match args.next() {
        Some(job_path) => {
            let raw = match std::fs::read_to_string(&job_path) {
                Ok(r) => r,
                Err(err) => {
                    eprintln!("cannot read {job_path}: {err}");
                    return ExitCode::FAILURE;
                }
            };
            match serde_json::from_str::<JobContext>(&raw) {
                Ok(job) => job,
                Err(err) => {
                    eprintln!("invalid job context in {job_path}: {err}");
                    return ExitCode::FAILURE;
                }
            }
        }
        None => JobContext::default(),
    };

    let extension = std::path::Path::new(&resume_path)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default();
    let source = SourceInfo {
        filename: resume_path.clone(),
        extension,
        size_bytes: text.len() as u64,
        is_scanned: false,
    };

    let doc = RawDocument::new(text, source, LayoutSignals::default());
    match analyze(&doc, &job) {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("failed to serialize report: {err}");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            eprintln!("analysis failed: {err}");
            ExitCode::FAILURE
        }
    }
}
