//! Process Invoker - 外部进程执行
//!
//! 带硬超时的子进程调用。任何失败（spawn 错误、非零退出、超时）
//! 都折叠为 false 加一条日志，不向上抛错。kill_on_drop 保证
//! 超时或请求取消时子进程被回收

use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::command::EngineCommand;

/// 外部进程调用器
#[derive(Debug, Default, Clone)]
pub struct ProcessInvoker;

impl ProcessInvoker {
    pub fn new() -> Self {
        Self
    }

    /// 执行命令，超时后强制终止
    pub async fn invoke(&self, cmd: EngineCommand) -> bool {
        let mut command = Command::new(&cmd.program);
        command
            .args(&cmd.args)
            .kill_on_drop(true)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(if cmd.stdin_text.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            });

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!(program = %cmd.program, error = %e, "Failed to spawn engine process");
                return false;
            }
        };

        if let Some(text) = &cmd.stdin_text {
            if let Some(mut stdin) = child.stdin.take() {
                if let Err(e) = stdin.write_all(text.as_bytes()).await {
                    tracing::warn!(program = %cmd.program, error = %e, "Failed to write engine stdin");
                    return false;
                }
                // 关闭 stdin，否则子进程会一直等输入
                drop(stdin);
            }
        }

        // 超时丢弃 wait future 时 kill_on_drop 负责收尸
        let output = match tokio::time::timeout(cmd.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                tracing::warn!(program = %cmd.program, error = %e, "Engine process wait failed");
                return false;
            }
            Err(_) => {
                tracing::warn!(
                    program = %cmd.program,
                    timeout_secs = cmd.timeout.as_secs(),
                    "Engine process timed out, killed"
                );
                return false;
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(
                program = %cmd.program,
                code = output.status.code().unwrap_or(-1),
                stderr = %stderr.trim(),
                "Engine process exited with error"
            );
            return false;
        }

        true
    }

    /// 执行命令并把 stdout 落盘（mimic3 类引擎）
    pub async fn invoke_capturing(&self, cmd: EngineCommand, output_path: &std::path::Path) -> bool {
        let mut command = Command::new(&cmd.program);
        command
            .args(&cmd.args)
            .kill_on_drop(true)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!(program = %cmd.program, error = %e, "Failed to spawn engine process");
                return false;
            }
        };

        let output = match tokio::time::timeout(cmd.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                tracing::warn!(program = %cmd.program, error = %e, "Engine process wait failed");
                return false;
            }
            Err(_) => {
                tracing::warn!(
                    program = %cmd.program,
                    timeout_secs = cmd.timeout.as_secs(),
                    "Engine process timed out, killed"
                );
                return false;
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(
                program = %cmd.program,
                code = output.status.code().unwrap_or(-1),
                stderr = %stderr.trim(),
                "Engine process exited with error"
            );
            return false;
        }

        if let Err(e) = tokio::fs::write(output_path, &output.stdout).await {
            tracing::warn!(path = %output_path.display(), error = %e, "Failed to write captured stdout");
            return false;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn cmd(program: &str, args: &[&str], timeout_secs: u64) -> EngineCommand {
        EngineCommand {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            stdin_text: None,
            stdout_to_file: false,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    #[tokio::test]
    async fn test_successful_command() {
        let invoker = ProcessInvoker::new();
        assert!(invoker.invoke(cmd("true", &[], 5)).await);
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_failure() {
        let invoker = ProcessInvoker::new();
        assert!(!invoker.invoke(cmd("false", &[], 5)).await);
    }

    #[tokio::test]
    async fn test_missing_program_is_failure_not_panic() {
        let invoker = ProcessInvoker::new();
        assert!(
            !invoker
                .invoke(cmd("definitely-not-a-real-tts-binary", &[], 5))
                .await
        );
    }

    #[tokio::test]
    async fn test_timeout_kills_process() {
        let invoker = ProcessInvoker::new();
        let mut command = cmd("sleep", &["10"], 1);
        command.timeout = Duration::from_millis(200);
        let start = std::time::Instant::now();
        assert!(!invoker.invoke(command).await);
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_stdin_text_is_delivered() {
        let invoker = ProcessInvoker::new();
        let mut command = cmd("cat", &[], 5);
        command.stdin_text = Some("piped text".to_string());
        assert!(invoker.invoke(command).await);
    }

    #[tokio::test]
    async fn test_capture_stdout_to_file() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("captured.wav");
        let invoker = ProcessInvoker::new();
        let command = cmd("echo", &["fake audio bytes"], 5);
        assert!(invoker.invoke_capturing(command, &out).await);
        let content = std::fs::read_to_string(&out).unwrap();
        assert_eq!(content.trim(), "fake audio bytes");
    }
}
