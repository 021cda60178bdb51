//! Engine Registry - 引擎命令模板
//!
//! 每个支持的引擎对应一条固定的外部命令模板。
//! 用户文本与音色字段只作为独立的 argv 元素传入，从不拼接
//! shell 字符串，Engine::Unknown 没有命令模板，编排方据此直接走兜底

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::voice::{Engine, Voice};

/// 引擎命令配置
#[derive(Debug, Clone)]
pub struct EngineCommandConfig {
    /// piper ONNX 模型所在目录
    pub piper_model_dir: PathBuf,
    /// 本地 OpenTTS 守护进程地址
    pub opentts_url: String,
    /// 默认超时（秒）
    pub default_timeout_secs: u64,
    /// 轻量引擎（espeak）的超时（秒）
    pub fast_timeout_secs: u64,
}

impl Default for EngineCommandConfig {
    fn default() -> Self {
        Self {
            piper_model_dir: PathBuf::from("models/piper"),
            opentts_url: "http://localhost:5500".to_string(),
            default_timeout_secs: 60,
            fast_timeout_secs: 30,
        }
    }
}

/// 一条待执行的外部命令
///
/// program + args 直接交给进程 API，不经过 shell
#[derive(Debug, Clone, PartialEq)]
pub struct EngineCommand {
    pub program: String,
    pub args: Vec<String>,
    /// 需要写入子进程 stdin 的文本（piper）
    pub stdin_text: Option<String>,
    /// 子进程把音频写到 stdout，由调用方落盘（mimic3）
    pub stdout_to_file: bool,
    pub timeout: Duration,
}

impl EngineCommand {
    fn new(program: &str, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.to_string(),
            args,
            stdin_text: None,
            stdout_to_file: false,
            timeout,
        }
    }
}

/// 为音色的引擎构造命令；Unknown 引擎返回 None
pub fn build_command(
    text: &str,
    voice: &Voice,
    output: &Path,
    config: &EngineCommandConfig,
) -> Option<EngineCommand> {
    let out = output.to_string_lossy().to_string();
    let timeout = Duration::from_secs(config.default_timeout_secs);

    let command = match voice.engine {
        Engine::Coqui => {
            let mut args = vec![
                "--text".to_string(),
                text.to_string(),
                "--model_name".to_string(),
                voice.model.clone(),
            ];
            if let Some(speaker) = &voice.speaker {
                args.push("--speaker_idx".to_string());
                args.push(speaker.clone());
            }
            args.push("--out_path".to_string());
            args.push(out);
            EngineCommand::new("tts", args, timeout)
        }
        Engine::Mozilla => EngineCommand::new(
            "tts",
            vec![
                "--text".to_string(),
                text.to_string(),
                "--model_name".to_string(),
                voice.model.clone(),
                "--out_path".to_string(),
                out,
            ],
            timeout,
        ),
        Engine::Piper => {
            let model_path = config
                .piper_model_dir
                .join(format!("{}.onnx", voice.model));
            let mut cmd = EngineCommand::new(
                "piper",
                vec![
                    "--model".to_string(),
                    model_path.to_string_lossy().to_string(),
                    "--output_file".to_string(),
                    out,
                ],
                timeout,
            );
            cmd.stdin_text = Some(text.to_string());
            cmd
        }
        Engine::Vits => python_module("vits.inference", text, &voice.model, &out, timeout),
        Engine::Glowtts => python_module("glowtts.inference", text, &voice.model, &out, timeout),
        Engine::Fastpitch => python_module(
            "nemo.collections.tts.models",
            text,
            &voice.model,
            &out,
            timeout,
        ),
        Engine::Tacotron2 => {
            python_module("tacotron2.inference", text, &voice.model, &out, timeout)
        }
        Engine::Mimic3 => {
            let mut cmd = EngineCommand::new(
                "mimic3",
                vec![
                    "--voice".to_string(),
                    voice.model.clone(),
                    text.to_string(),
                ],
                timeout,
            );
            cmd.stdout_to_file = true;
            cmd
        }
        Engine::Espeak => EngineCommand::new(
            "espeak-ng",
            vec![
                "-v".to_string(),
                voice.model_or_language().to_string(),
                "-w".to_string(),
                out,
                text.to_string(),
            ],
            Duration::from_secs(config.fast_timeout_secs),
        ),
        // 本地 HTTP 守护进程：curl 自己做 URL 编码，文本仍是单个 argv 元素
        Engine::Opentts => EngineCommand::new(
            "curl",
            vec![
                "-s".to_string(),
                "-G".to_string(),
                format!("{}/api/tts", config.opentts_url),
                "--data-urlencode".to_string(),
                format!("voice={}", voice.model),
                "--data-urlencode".to_string(),
                format!("text={}", text),
                "-o".to_string(),
                out,
            ],
            timeout,
        ),
        Engine::Unknown => return None,
    };

    Some(command)
}

fn python_module(
    module: &str,
    text: &str,
    model: &str,
    out: &str,
    timeout: Duration,
) -> EngineCommand {
    EngineCommand::new(
        "python",
        vec![
            "-m".to_string(),
            module.to_string(),
            "--text".to_string(),
            text.to_string(),
            "--model".to_string(),
            model.to_string(),
            "--output".to_string(),
            out.to_string(),
        ],
        timeout,
    )
}
