use clap::Parser;
use colored::*;
use mpi_bench::error::BenchError;
use mpi_bench::runner::{run_once, Launcher, Metric, RunReport, Stats, TaskReport};
use mpi_bench::task::{self, Launch, Task, TASKS};
use std::error::Error;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::result::Result;
use tracing::info;

#[derive(Parser)]
#[clap(version = "0.1.0", about = "Runs the message passing benchmark tasks")]
struct Opts {
    /// process counts to run every task on, the first one is the baseline
    #[clap(long, multiple_values = true, default_values = &["1", "2", "4"])]
    process_counts: Vec<usize>,
    #[clap(long, default_value = "100")]
    iterations: usize,
    /// task aliases, defaults to all of them
    #[clap(long, multiple_values = true)]
    tasks: Vec<String>,
    #[clap(long, multiple_values = true, default_values = &["rtet", "mpct"])]
    metrics: Vec<Metric>,
    /// launcher to use instead of looking for mpirun or mpiexec
    #[clap(long)]
    launcher: Option<String>,
    /// directory holding the task binaries, defaults to this binary's
    #[clap(long)]
    bin_dir: Option<PathBuf>,
    /// print a json report instead of the colored one
    #[clap(long)]
    json: bool,
}

/// reports on the current line of stdout the progress of the running task
fn report_progress(msg: &str, done: usize, size: usize) -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "\r\x1b[2K{} {}/{}", msg, done, size)?;
    stdout.flush()
}

fn format_stats(stats: &Stats, speedup: Option<f64>) -> String {
    let mut report = format!(
        "min = {:.3}s, max = {:.3}s, avg = {:.3}s",
        stats.min, stats.max, stats.avg
    );
    if let Some(speedup) = speedup {
        let s = format!("{:.3}%", speedup);
        let s = if speedup > 0.0 {
            format!("+{}", s).as_str().green()
        } else {
            s.as_str().red()
        };
        report += &format!(" ({})", s);
    }
    report
}

fn print_run(label: &str, run: &RunReport, metrics: &[Metric]) {
    let mut report = String::new();
    if metrics.contains(&Metric::Rtet) {
        report += &format!(
            "\n      {} {}",
            "RTET:".bright_black().bold(),
            format_stats(&run.rtet, run.rtet_speedup)
        );
    }
    match &run.mpct {
        Some(mpct) if metrics.contains(&Metric::Mpct) => report += &format!(
            "\n      {} {}",
            "MPCT:".green().bold(),
            format_stats(mpct, run.mpct_speedup)
        ),
        _ => {}
    }
    print!("\r\x1b[2K");
    println!("    {}{}", label.bold().underline(), report);
}

fn run_task(
    task: &Task,
    launcher: &Launcher,
    opts: &Opts,
    bin_dir: &Path,
) -> Result<TaskReport, Box<dyn Error>> {
    // serial tasks ignore the process count, run them once as the baseline
    let counts: Vec<usize> = match task.launch {
        Launch::Mpi => opts.process_counts.clone(),
        Launch::Serial => vec![1],
    };
    let label = match task.launch {
        Launch::Mpi => "MPI:",
        Launch::Serial => "serial:",
    };

    let mut report = TaskReport::new(*task, &opts.metrics);
    for np in counts {
        if !opts.json {
            println!("  {}", format!("Running on {} process(es)", np).as_str().blue().underline());
        }
        info!("{}: running {} iterations on {} processes", task.alias, opts.iterations, np);

        let mut samples = Vec::with_capacity(opts.iterations);
        for itr in 0..opts.iterations {
            if !opts.json {
                report_progress(&format!("    {} Iteration", label), itr + 1, opts.iterations)?;
            }
            samples.push(run_once(launcher, task, bin_dir, np)?);
        }

        if let Some(run) = RunReport::from_samples(np, &samples) {
            report.push(run);
            if !opts.json {
                if let Some(run) = report.runs.last() {
                    print_run(label, run, &report.metrics);
                }
            }
        }
    }
    Ok(report)
}

fn main() -> Result<(), Box<dyn Error>> {
    mpi_bench::init_tracing();
    let opts: Opts = Opts::parse();
    if opts.process_counts.iter().any(|np| *np == 0) {
        return Err(BenchError::NoProcesses.into());
    }

    let tasks: Vec<&Task> = if opts.tasks.is_empty() {
        TASKS.iter().collect()
    } else {
        opts.tasks
            .iter()
            .map(|alias| task::find(alias))
            .collect::<Result<_, _>>()?
    };

    let bin_dir = match &opts.bin_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_exe()?
            .parent()
            .map(|dir| dir.to_path_buf())
            .unwrap_or_default(),
    };

    if !opts.json {
        println!("{}", "MPI Benchmarks".cyan().bold());
        println!();
        print!("Checking MPI Binaries ...");
        io::stdout().flush()?;
    }
    let launcher = match &opts.launcher {
        Some(program) => Launcher::new(program),
        None => Launcher::detect()?,
    };
    if !opts.json {
        println!(" {} ({})", "Found!".green(), launcher.program);
        println!();
    }

    let mut reports = Vec::with_capacity(tasks.len());
    for task in tasks {
        if !opts.json {
            println!("{}", format!("Task: {}", task.name).as_str().red().bold());
            println!("{}", task.description);
            println!();
        }
        let report = run_task(task, &launcher, &opts, &bin_dir)?;
        if !opts.json {
            if report.mpct_parse_error(&opts.metrics) {
                eprintln!(
                    "\n{}\n",
                    "MPCT Report Skipped due to Error in Parsing CPU times.".bold().red()
                );
            } else {
                println!();
            }
        }
        reports.push(report);
    }

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(())
}
