mod logging;

use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand};

use pubtask_core::impls::{OutputMode, ProcessRunner, RecordingRunner};
use pubtask_core::ports::CommandRunner;
use pubtask_core::{AppBuilder, FailurePolicy, Invocation, PublishConfig, Runtime, TaskArgs};

/// Publish tasks for the expectations library.
///
/// `pubtask publish:fig[1.2.3]` / `pubtask publish:clojars` / `pubtask list`
#[derive(Debug, Parser)]
#[command(
    name = "pubtask",
    version,
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
struct Cli {
    /// Debug logging (shows captured command output)
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Config file (default: ./pubtask.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    run: RunArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List available tasks
    List,
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Task invocations run in order (`name` or `name[arg,...]`)
    #[arg(required = true, value_name = "TASK")]
    tasks: Vec<String>,

    /// Named task argument, e.g. `--arg v=1.2.3`
    #[arg(short = 'a', long = "arg", value_name = "KEY=VALUE")]
    args: Vec<String>,

    /// Print the commands without running them
    #[arg(short = 'n', long, action = ArgAction::SetTrue)]
    dry_run: bool,

    /// Stop at the first command that exits non-zero
    #[arg(long, action = ArgAction::SetTrue)]
    fail_fast: bool,

    /// Let commands write straight to the terminal instead of capturing stdout
    #[arg(long, action = ArgAction::SetTrue)]
    stream: bool,

    /// Print a JSON report for each task to stdout
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = logging::init_logging(cli.verbose) {
        eprintln!("error: {err:#}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(code) => ExitCode::from(clamp_exit_code(code)),
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<i32> {
    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    let config = PublishConfig::discover(cli.config.as_deref(), &cwd)?;

    match cli.command {
        Some(Command::List) => {
            let runtime = build_runtime(config, Arc::new(RecordingRunner::new()), false)?;
            for info in runtime.registry().describe() {
                println!("{:<28} # {}", info.signature(), info.description);
            }
            Ok(0)
        }
        None => run_tasks(config, cli.run).await,
    }
}

fn build_runtime(
    config: PublishConfig,
    runner: Arc<dyn CommandRunner>,
    fail_fast: bool,
) -> Result<Runtime> {
    let policy = if fail_fast {
        FailurePolicy::Halt
    } else {
        FailurePolicy::Continue
    };
    let runtime = AppBuilder::new()
        .with_builtin_tasks()?
        .expect_tasks(&["publish:fig", "publish:clojars"])
        .config(config)
        .runner(runner)
        .failure_policy(policy)
        .build()?;
    Ok(runtime)
}

async fn run_tasks(config: PublishConfig, args: RunArgs) -> Result<i32> {
    let recorder = Arc::new(RecordingRunner::new());
    let runner: Arc<dyn CommandRunner> = if args.dry_run {
        recorder.clone()
    } else if args.stream {
        Arc::new(ProcessRunner::new(OutputMode::Inherit))
    } else {
        Arc::new(ProcessRunner::new(OutputMode::CaptureStdout))
    };
    let runtime = build_runtime(config, runner, args.fail_fast)?;

    let invocations = args
        .tasks
        .iter()
        .map(|raw| Invocation::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;
    let explicit = parse_explicit_args(&args.args)?;

    let opts = RunOptions {
        fail_fast: args.fail_fast,
        json: args.json,
    };
    let dry_run = args.dry_run.then_some(recorder.as_ref());
    run_invocations(
        &runtime,
        &invocations,
        &explicit,
        &opts,
        dry_run,
        &mut io::stdout().lock(),
    )
    .await
}

#[derive(Debug, Clone, Copy, Default)]
struct RunOptions {
    fail_fast: bool,
    json: bool,
}

/// タスクを順に実行し、最後に実行したタスクの終了コードを返す
///
/// - 起動失敗はその場で全体を中断する
/// - `fail_fast` なら non-zero で終わったタスクの後は実行しない
/// - `dry_run` が渡されたら、そのタスク分の記録行を `out` に書く
async fn run_invocations<W: Write>(
    runtime: &Runtime,
    invocations: &[Invocation],
    explicit: &TaskArgs,
    opts: &RunOptions,
    dry_run: Option<&RecordingRunner>,
    out: &mut W,
) -> Result<i32> {
    check_explicit_args(runtime, invocations, explicit)?;

    let mut last_code = 0;
    let mut printed = 0;
    for invocation in invocations {
        let task_args = scoped_args(runtime, invocation, explicit)?;
        let report = runtime
            .invoke_parsed(invocation, &task_args)
            .await
            .with_context(|| format!("task '{}' aborted", invocation.name))?;

        if let Some(recorder) = dry_run {
            // recorder は全タスク分を溜めるので、今回の分だけ出す
            let calls = recorder.calls();
            for call in &calls[printed..] {
                writeln!(out, "{call}")?;
            }
            printed = calls.len();
        }
        if opts.json {
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }

        last_code = report.exit_code();
        if opts.fail_fast && last_code != 0 {
            tracing::warn!(task = %invocation.name, "stopping after failed task");
            break;
        }
    }
    Ok(last_code)
}

fn parse_explicit_args(raw: &[String]) -> Result<TaskArgs> {
    let mut args = TaskArgs::new();
    for pair in raw {
        let (k, v) = TaskArgs::parse_pair(pair)?;
        args.insert(k, v);
    }
    Ok(args)
}

/// `--arg` のキーはどれかのタスクが宣言していなければならない
fn check_explicit_args(
    runtime: &Runtime,
    invocations: &[Invocation],
    explicit: &TaskArgs,
) -> Result<()> {
    let mut declared = BTreeSet::new();
    for inv in invocations {
        let task = runtime.registry().resolve(&inv.name)?;
        declared.extend(task.params().iter().copied());
    }
    for (key, _) in explicit.iter() {
        if !declared.contains(key) {
            bail!("no requested task accepts argument '{key}'");
        }
    }
    Ok(())
}

/// タスクが宣言しているキーだけを渡す
fn scoped_args(
    runtime: &Runtime,
    invocation: &Invocation,
    explicit: &TaskArgs,
) -> Result<TaskArgs> {
    let task = runtime.registry().resolve(&invocation.name)?;
    let mut scoped = TaskArgs::new();
    for (key, value) in explicit.iter() {
        if task.params().iter().any(|p| *p == key) {
            scoped.insert(key, value);
        }
    }
    Ok(scoped)
}

fn clamp_exit_code(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}
