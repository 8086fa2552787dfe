//! # xtask - 开发辅助工具
//!
//! - `check-all`: 依次运行 fmt、clippy、test
//! - `config-check`: 检查过渡配置文件（JSON 语法、取值范围）

use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use switcher_transition::TransitionConfig;
use walkdir::WalkDir;

/// `check-all` 依次执行的 cargo 子命令
const CHECK_STEPS: &[&[&str]] = &[
    &["fmt", "--all", "--", "--check"],
    &["clippy", "--workspace", "--all-targets"],
    &["test", "--workspace"],
];

fn cargo(args: &[&str]) -> anyhow::Result<()> {
    let line = args.join(" ");
    eprintln!("\n==> cargo {line}");
    let status = Command::new("cargo").args(args).status()?;
    anyhow::ensure!(status.success(), "cargo {line} 失败: {status}");
    Ok(())
}

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let result = match args.next().as_deref() {
        Some("check-all") => CHECK_STEPS.iter().try_for_each(|step| cargo(step)),
        Some("config-check") => config_check(args.next().as_deref()),
        None | Some("help" | "-h" | "--help") => {
            print_help();
            Ok(())
        }
        Some(other) => Err(anyhow::anyhow!("未知的 xtask 子命令: {other}")),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("xtask error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn print_help() {
    eprintln!(
        r#"xtask - 开发辅助工具

USAGE:
  cargo xtask <command>

COMMANDS:
  check-all       运行 fmt、clippy、test 门禁检查
  config-check    检查过渡配置文件

CONFIG-CHECK:
  cargo xtask config-check [path]

  不带参数：检查 config/ 下所有 .json 文件
  带路径参数：检查指定文件或目录

  检查内容：
    - JSON 语法与字段类型
    - 动画时长上限、新建内容入口内缩量
"#
    );
}

//=============================================================================
// config-check 命令实现
//=============================================================================

/// 默认配置目录（相对于 workspace root）
const DEFAULT_CONFIG_DIR: &str = "config";

/// 执行配置检查
fn config_check(path: Option<&str>) -> anyhow::Result<()> {
    let files = match path {
        Some(p) => {
            let path = PathBuf::from(p);
            if path.is_file() {
                vec![path]
            } else if path.is_dir() {
                collect_config_files(&path)
            } else {
                anyhow::bail!("路径不存在: {}", p);
            }
        }
        None => {
            let dir = Path::new(DEFAULT_CONFIG_DIR);
            if !dir.exists() {
                anyhow::bail!(
                    "默认配置目录不存在: {}\n请在 workspace 根目录运行，或指定配置路径",
                    dir.display()
                );
            }
            collect_config_files(dir)
        }
    };

    if files.is_empty() {
        eprintln!("未找到配置文件（.json）");
        return Ok(());
    }

    eprintln!("==> 检查 {} 个配置文件...\n", files.len());

    let mut errors = 0;
    for file in &files {
        match TransitionConfig::try_load(file) {
            Ok(config) => {
                eprintln!(
                    "[OK] {}: translate {}ms, fade {}ms, shrink_expand {}ms, scrim {}ms",
                    file.display(),
                    config.translate.duration_ms,
                    config.fade.duration_ms,
                    config.shrink_expand.duration_ms,
                    config.scrim.duration_ms,
                );
            }
            Err(e) => {
                eprintln!("[ERROR] {}: {}", file.display(), e);
                errors += 1;
            }
        }
    }

    eprintln!("─────────────────────────────────────────────────────");
    if errors > 0 {
        eprintln!("❌ {} 个错误", errors);
        anyhow::bail!("配置检查发现错误");
    }
    eprintln!("✅ 检查通过，无错误");
    Ok(())
}

/// 收集目录下的所有 JSON 文件
fn collect_config_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}
