//! 徽章评估命令行工具
//!
//! 读取训练记录或运动员统计（JSON 文件或命令行参数），输出满足条件的徽章 ID；
//! 也可按分类/类型列出徽章目录。

use anyhow::{Context, Result};
use badge_engine::{
    AthleteStats, BadgeCatalog, BadgeCategory, BadgeDefinition, BadgeEvaluator, Lift, Workout,
};
use badge_shared::config::AppConfig;
use badge_shared::observability;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const SERVICE_NAME: &str = "badge-eval";

/// 徽章评估命令行工具
#[derive(Parser, Debug)]
#[command(name = "badge-eval")]
#[command(version, about = "Evaluate fitness badges against workouts and athlete stats")]
#[command(propagate_version = true)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)，覆盖配置文件
    #[arg(short, long)]
    log_level: Option<String>,

    /// 自定义目录文件（.json / .toml），覆盖 engine.catalog_path
    #[arg(long)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 列出徽章目录
    Catalog {
        /// 只列出指定分类（strength, milestone, endurance, competition）
        #[arg(short, long)]
        category: Option<String>,

        /// 只列出手动徽章
        #[arg(long, conflicts_with = "automatic")]
        manual: bool,

        /// 只列出自动徽章
        #[arg(long)]
        automatic: bool,
    },

    /// 评估单次训练
    Workout {
        /// 训练记录 JSON 文件
        #[arg(short, long, conflicts_with_all = ["name", "completed"])]
        file: Option<PathBuf>,

        /// 训练名称
        #[arg(short, long)]
        name: Option<String>,

        /// 训练是否已完成
        #[arg(long)]
        completed: bool,
    },

    /// 评估运动员聚合统计
    Stats(StatsArgs),
}

#[derive(Args, Debug)]
struct StatsArgs {
    /// 统计 JSON 文件
    #[arg(short, long)]
    file: Option<PathBuf>,

    #[arg(long)]
    squat: Option<f64>,

    #[arg(long)]
    bench: Option<f64>,

    #[arg(long)]
    deadlift: Option<f64>,

    #[arg(long)]
    ohp: Option<f64>,

    #[arg(long)]
    bodyweight: Option<f64>,

    #[arg(long)]
    total_workouts: Option<u32>,
}

impl StatsArgs {
    /// 文件内容为基础，命令行参数覆盖同名字段
    fn into_stats(self) -> Result<AthleteStats> {
        let mut stats = match &self.file {
            Some(path) => AthleteStats::from_json(&read_file(path)?)
                .with_context(|| format!("invalid stats json: {}", path.display()))?,
            None => AthleteStats::new(),
        };

        let lifts = [
            (Lift::Squat, self.squat),
            (Lift::Bench, self.bench),
            (Lift::Deadlift, self.deadlift),
            (Lift::OverheadPress, self.ohp),
        ];
        for (lift, value) in lifts {
            if let Some(weight) = value {
                stats = stats.with_lift(lift, weight);
            }
        }
        if let Some(bw) = self.bodyweight {
            stats = stats.with_bodyweight(bw);
        }
        if let Some(count) = self.total_workouts {
            stats = stats.with_total_workouts(count);
        }

        Ok(stats)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(SERVICE_NAME).unwrap_or_else(|e| {
        eprintln!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });
    if let Some(level) = &cli.log_level {
        config.observability.log_level = level.clone();
    }

    if let Err(e) = observability::init(&config.service_name, &config.observability) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let catalog_path = cli.catalog.clone().or_else(|| config.engine.catalog_path());
    let loaded;
    let catalog: &BadgeCatalog = match catalog_path {
        Some(path) => {
            loaded = BadgeCatalog::from_file(&path)
                .with_context(|| format!("failed to load catalog: {}", path.display()))?;
            &loaded
        }
        None => BadgeCatalog::builtin(),
    };
    info!(badges = catalog.len(), "Catalog ready");

    let evaluator = BadgeEvaluator::new(catalog);

    match cli.command {
        Commands::Catalog {
            category,
            manual,
            automatic,
        } => {
            let category = match category.as_deref() {
                Some(raw) => Some(
                    BadgeCategory::parse(raw)
                        .with_context(|| format!("unknown category: {}", raw))?,
                ),
                None => None,
            };

            let selected: Vec<&BadgeDefinition> = catalog
                .iter()
                .filter(|d| category.is_none_or(|c| d.category == c))
                .filter(|d| !manual || d.is_manual())
                .filter(|d| !automatic || d.is_automatic())
                .collect();

            println!("{}", serde_json::to_string_pretty(&selected)?);
        }
        Commands::Workout {
            file,
            name,
            completed,
        } => {
            let workout = match file {
                Some(path) => Workout::from_json(&read_file(&path)?)
                    .with_context(|| format!("invalid workout json: {}", path.display()))?,
                None => {
                    if name.is_none() {
                        warn!("No workout name given, nothing can match");
                    }
                    Workout {
                        name,
                        is_completed: completed,
                        ..Default::default()
                    }
                }
            };

            let ids = evaluator.evaluate_workout(&workout);
            println!("{}", serde_json::to_string(&ids)?);
        }
        Commands::Stats(args) => {
            let stats = args.into_stats()?;
            let ids = evaluator.evaluate_stats(&stats);
            println!("{}", serde_json::to_string(&ids)?);
        }
    }

    Ok(())
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
