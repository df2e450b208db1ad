//! # Command Execution Module / 命令执行模块
//!
//! Spawns external processes (the regression engine's interpreter, simulator
//! binaries, the code generator), optionally feeds them scripted stdin
//! answers, and captures their merged stdout and stderr.
//!
//! 派生外部进程（回归引擎的解释器、仿真器可执行文件、代码生成器），
//! 可选地向其 stdin 写入预设答案，并捕获合并后的 stdout 和 stderr。

use anyhow::{Context, Result, anyhow};
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::LinesStream;
use tokio_util::sync::CancellationToken;

use crate::core::error::RegressError;

/// Exit status and merged output of a finished process.
/// 已结束进程的退出状态和合并输出。
#[derive(Debug)]
pub struct Captured {
    pub status: ExitStatus,
    pub output: String,
}

impl Captured {
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }
}

/// Expands `~` and environment variables, then splits a command line with
/// shell quoting rules.
pub fn split_command_line(line: &str) -> Result<Vec<String>> {
    let expanded = shellexpand::full(line)
        .with_context(|| format!("Failed to expand command: {line}"))?
        .to_string();

    let parts = shlex::split(&expanded)
        .ok_or_else(|| anyhow!("Failed to parse command: {}", expanded))?;

    if parts.is_empty() {
        return Err(anyhow!("Empty command after parsing."));
    }
    Ok(parts)
}

/// Builds a command from an argv list, running in `cwd`.
pub fn command_from_argv(argv: &[String], cwd: &Path) -> Result<Command> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| anyhow!("Empty command."))?;
    let mut cmd = Command::new(program);
    cmd.args(args).current_dir(cwd);
    Ok(cmd)
}

/// Spawns `cmd`, writes each of `answers` as one line on its stdin, and
/// captures stdout and stderr until the process exits. With `echo` set every
/// line is also printed as it arrives.
///
/// Stdin is closed after the last answer, so a process that asks for more
/// input than it was given sees end-of-file instead of hanging. Answers are
/// written while output is drained, so neither pipe can fill up and stall the
/// child. When `cancel` fires the child is killed and
/// [`RegressError::Cancelled`] is returned.
///
/// 派生 `cmd`，将 `answers` 逐行写入其 stdin，并捕获 stdout 和 stderr 直到进程退出。
/// 写完最后一个答案后关闭 stdin。`cancel` 触发时会终止子进程并返回 `Cancelled`。
pub async fn spawn_and_capture(
    mut cmd: Command,
    answers: &[String],
    echo: bool,
    cancel: &CancellationToken,
) -> Result<Captured> {
    let stdin_mode = if answers.is_empty() {
        Stdio::null()
    } else {
        Stdio::piped()
    };
    let mut child = cmd
        .stdin(stdin_mode)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("Failed to spawn {:?}", cmd.as_std().get_program()))?;

    let stdin = child.stdin.take();
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow!("Failed to capture stdout"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow!("Failed to capture stderr"))?;

    let feed = async move {
        if let Some(mut stdin) = stdin {
            for answer in answers {
                stdin.write_all(answer.as_bytes()).await?;
                stdin.write_all(b"\n").await?;
            }
            stdin.shutdown().await?;
        }
        Ok::<(), std::io::Error>(())
    };

    let drain = async move {
        let mut lines = LinesStream::new(BufReader::new(stdout).lines())
            .merge(LinesStream::new(BufReader::new(stderr).lines()));
        let mut output = String::new();
        while let Some(line) = lines.next().await {
            match line {
                Ok(line) => {
                    if echo {
                        println!("{}", line);
                    }
                    output.push_str(&line);
                    output.push('\n');
                }
                Err(e) => {
                    tracing::debug!("stopped reading child output: {}", e);
                    break;
                }
            }
        }
        output
    };

    let work = async {
        let (fed, output) = futures::future::join(feed, drain).await;
        if let Err(e) = fed {
            // The child stopped reading before all answers were delivered;
            // its exit status tells the caller what happened.
            tracing::warn!("could not deliver all stdin answers: {}", e);
        }
        let status = child.wait().await.context("Failed to get process status")?;
        Ok::<Captured, anyhow::Error>(Captured { status, output })
    };

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(RegressError::Cancelled.into()),
        res = work => res,
    }
}
