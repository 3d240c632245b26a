//! Batch command - score JSON lines of question pairs in parallel.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;

use super::{build_pipeline, report_error};
use crate::config::Settings;
use crate::io::ExitCode;
use crate::pipeline::{PairOutcome, PipelineError, QuestionPair};
use crate::types::validate_threshold;

/// Options for one batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub vocab: Option<PathBuf>,
    pub threshold: Option<f64>,
    pub threads: Option<usize>,
    pub include_features: bool,
}

/// Run batch command.
pub fn run(options: &BatchOptions, settings: &Settings) -> ExitCode {
    let start = Instant::now();

    match execute(options, settings) {
        Ok((total, failed)) => {
            eprintln!(
                "Scored {total} pairs ({failed} failed) in {:.2}s",
                start.elapsed().as_secs_f64()
            );
            if failed > 0 {
                ExitCode::InvalidInput
            } else {
                ExitCode::Success
            }
        }
        Err(e) => match e.downcast_ref::<PipelineError>() {
            Some(pipeline_error) => report_error(pipeline_error, false),
            None => {
                eprintln!("Error: {e:#}");
                ExitCode::GeneralError
            }
        },
    }
}

/// Parse JSON lines into pairs. Blank lines are skipped; malformed lines keep
/// their position and carry the parse error.
pub fn parse_pairs(content: &str) -> Vec<Result<QuestionPair, String>> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str::<QuestionPair>(line).map_err(|e| e.to_string()))
        .collect()
}

/// Score parsed records, keeping one outcome per record in input order.
pub fn score_records(
    records: Vec<Result<QuestionPair, String>>,
    pipeline: &crate::pipeline::QuestionPipeline,
    threshold: f64,
    include_features: bool,
) -> Result<Vec<PairOutcome>, PipelineError> {
    let mut positions = Vec::with_capacity(records.len());
    let mut pairs = Vec::with_capacity(records.len());
    let mut outcomes = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        match record {
            Ok(pair) => {
                positions.push(index);
                pairs.push(pair);
            }
            Err(reason) => outcomes.push(PairOutcome {
                index,
                result: None,
                features: None,
                error: Some(format!("Malformed input line: {reason}")),
            }),
        }
    }

    for mut outcome in pipeline.compare_batch(&pairs, threshold, include_features)? {
        outcome.index = positions[outcome.index];
        outcomes.push(outcome);
    }

    outcomes.sort_by_key(|outcome| outcome.index);
    Ok(outcomes)
}

fn execute(options: &BatchOptions, settings: &Settings) -> anyhow::Result<(usize, usize)> {
    let threshold = validate_threshold(options.threshold.unwrap_or(settings.scoring.threshold))?;
    let threads = options.threads.unwrap_or(settings.batch.parallel_threads).max(1);

    let content = std::fs::read_to_string(&options.input)
        .with_context(|| format!("Failed to read {}", options.input.display()))?;
    let records = parse_pairs(&content);

    let pipeline = build_pipeline(settings, options.vocab.as_deref())?;

    tracing::info!(
        target: "batch",
        "Scoring {} records with {} threads",
        records.len(),
        threads
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("Failed to create thread pool")?;

    let outcomes = pool.install(|| {
        score_records(records, &pipeline, threshold, options.include_features)
    })?;

    write_outcomes(&outcomes, options.output.as_deref())?;

    let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
    crate::log_event!("batch", "written", "{} results, {} failed", outcomes.len(), failed);
    Ok((outcomes.len(), failed))
}

fn write_outcomes(outcomes: &[PairOutcome], output: Option<&Path>) -> anyhow::Result<()> {
    let mut writer: BufWriter<Box<dyn Write>> = match output {
        Some(path) => BufWriter::new(Box::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => BufWriter::new(Box::new(std::io::stdout().lock())),
    };

    for outcome in outcomes {
        serde_json::to_writer(&mut writer, outcome)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    Ok(())
}
