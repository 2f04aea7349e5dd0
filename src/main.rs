use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use tracing::info;

use question_seeder::config::Config;
use question_seeder::orchestrator::{App, RunMode};
use question_seeder::services::TemplateWriter;
use question_seeder::utils::logging;

/// 题库种子导入工具
#[derive(Parser, Debug)]
#[command(name = "question-seeder", version, about = "Seed and reconcile the quiz question bank")]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["all", "initial", "updates", "update_file", "file", "test_data", "create"])
))]
struct Cli {
    /// 初始题库，然后全部更新文件
    #[arg(long)]
    all: bool,

    /// 仅初始题库
    #[arg(long)]
    initial: bool,

    /// 全部更新文件（字典序）
    #[arg(long)]
    updates: bool,

    /// 单个更新文件
    #[arg(long, value_name = "PATH")]
    update_file: Option<PathBuf>,

    /// 任意单个文件
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// 测试数据（永不覆盖）
    #[arg(long)]
    test_data: bool,

    /// 在更新目录下创建一个带日期的更新文件模板
    #[arg(long, value_name = "NAME")]
    create: Option<String>,

    /// 比对并修正已有题目
    #[arg(long)]
    force: bool,

    /// TOML 配置文件
    #[arg(long, env = "SEEDER_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// 日志详细程度 (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// 命令行选择的动作
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Seed(RunMode),
    CreateTemplate(String),
}

impl Cli {
    fn action(&self) -> Action {
        let force = self.force;
        if let Some(name) = &self.create {
            return Action::CreateTemplate(name.clone());
        }
        let mode = if self.all {
            RunMode::All { force }
        } else if self.initial {
            RunMode::Initial { force }
        } else if self.updates {
            RunMode::Updates
        } else if let Some(path) = &self.update_file {
            RunMode::UpdateFile(path.clone())
        } else if let Some(path) = &self.file {
            RunMode::File {
                path: path.clone(),
                force,
            }
        } else {
            RunMode::TestData
        };
        Action::Seed(mode)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::load(cli.config.as_deref()).context("加载配置失败")?;

    // 初始化日志
    let verbosity = cli.verbose.max(u8::from(config.verbose_logging));
    logging::init(verbosity);

    match cli.action() {
        Action::CreateTemplate(name) => {
            let path = TemplateWriter::new(config.updates_dir())
                .create(&name)
                .await?;
            info!("✅ 已创建更新文件: {}", path.display());
            println!("{}", path.display());
        }
        Action::Seed(mode) => {
            // 初始化并运行应用
            App::initialize(config)?.run(&mode).await?;
        }
    }

    Ok(())
}
