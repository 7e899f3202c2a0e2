// main.rs - CLI entry point

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use snp_dists::cli::Config;
use snp_dists::prelude::*;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();

    if args.version {
        println!("{}", snp_dists::get_info());
        return Ok(());
    }

    if args.generate_config {
        print!("{}", Config::generate_sample());
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    let validation_result = validate_args(&args)?;
    let reporter = Reporter::new(args.quiet);
    reporter.info(&format!("This is {}", snp_dists::get_info()));

    if let Some(config_path) = &args.config {
        reporter.info(&format!("Loaded configuration from: {}", config_path));
    }

    // Configure thread pool
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        reporter.info(&format!("Threads: {}", n));
    } else {
        reporter.info(&format!("Threads: {} (auto-detected)", rayon::current_num_threads()));
    }

    let total_start = Instant::now();

    let alignment = load_alignment(
        Path::new(&validation_result.alignment_path),
        &validation_result.load_options,
    )
    .map_err(|e| e.to_string())?;

    reporter.info(&format!(
        "Read {} sequences of length {}",
        alignment.len(),
        alignment.sequence_length()
    ));

    if alignment.len() == 1 {
        reporter.warn("Only one sequence found; the matrix is a single zero");
    }
    if alignment.sequence_length() == 0 {
        reporter.warn("Sequences are empty; every distance will be 0");
    }

    if args.dry_run {
        reporter.info("Dry run completed successfully");
        return Ok(());
    }

    let table = Arc::new(MismatchTable::new(validation_result.ambiguity));
    reporter.info(&format!(
        "Mismatch model: {}",
        validation_result.ambiguity.description()
    ));

    let engine = DistanceEngine::new(table);
    let pb = reporter.progress_bar(alignment.len() as u64);
    let compute_start = Instant::now();
    let matrix = engine.compute_with_progress(&alignment, &pb);
    pb.finish_and_clear();

    let comparisons = alignment.len() * alignment.len().saturating_sub(1) / 2;
    reporter.info(&format!(
        "Computed {} pairwise distances in {:.2}s",
        comparisons,
        compute_start.elapsed().as_secs_f64()
    ));
    if let Some(max) = matrix.max_distance() {
        reporter.info(&format!("Largest pairwise distance: {}", max));
    }

    let writer = open_output(args.output.as_deref())?;
    write_matrix(
        writer,
        &alignment.names(),
        &matrix,
        &validation_result.output_options,
    )?;

    if let Some(output) = &args.output {
        reporter.info(&format!(
            "Distance matrix written to: {} ({})",
            output,
            validation_result.output_options.format.description()
        ));
    }
    reporter.info(&format!(
        "Total execution time: {:.2}s",
        total_start.elapsed().as_secs_f64()
    ));

    Ok(())
}
