//! 徽章目录
//!
//! 进程启动时构建一次、此后只读的徽章定义集合，保留声明顺序。
//! 支持内置目录，以及从 JSON/TOML 文件加载自定义目录。

use crate::builtin;
use crate::error::{CatalogError, Result};
use crate::models::{BadgeCategory, BadgeDefinition, BadgeKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::LazyLock;
use tracing::{info, instrument};

static BUILTIN_CATALOG: LazyLock<BadgeCatalog> =
    LazyLock::new(|| BadgeCatalog::build(builtin::definitions()));

/// 目录文件格式
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub badges: Vec<BadgeDefinition>,
}

/// 徽章目录
#[derive(Debug, Clone)]
pub struct BadgeCatalog {
    /// 按声明顺序排列的定义
    definitions: Vec<BadgeDefinition>,
    /// id -> definitions 下标
    index: HashMap<String, usize>,
}

impl BadgeCatalog {
    /// 内置目录（进程级单例）
    pub fn builtin() -> &'static BadgeCatalog {
        &BUILTIN_CATALOG
    }

    /// 从定义列表构建目录
    ///
    /// 校验 ID 非空且唯一、判定条件参数合法；训练名称条件统一转为小写。
    pub fn from_definitions(definitions: Vec<BadgeDefinition>) -> Result<Self> {
        let mut seen = HashMap::with_capacity(definitions.len());

        for (i, def) in definitions.iter().enumerate() {
            if def.id.trim().is_empty() {
                return Err(CatalogError::EmptyId { index: i });
            }
            if seen.insert(def.id.as_str(), i).is_some() {
                return Err(CatalogError::DuplicateId(def.id.clone()));
            }

            let checked = match &def.kind {
                BadgeKind::AutomaticStat { criterion } => criterion.validate(),
                BadgeKind::AutomaticWorkout { criterion } => criterion.validate(),
                BadgeKind::Manual => Ok(()),
            };
            checked.map_err(|reason| CatalogError::InvalidCriterion {
                badge_id: def.id.clone(),
                reason,
            })?;
        }

        Ok(Self::build(definitions))
    }

    /// 从 JSON 字符串加载（`{"badges": [...]}`）
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_definitions(file.badges)
    }

    /// 从文件加载，格式由扩展名决定（.json / .toml）
    #[instrument]
    pub fn from_file(path: &Path) -> Result<Self> {
        let file: CatalogFile = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize()?;

        let catalog = Self::from_definitions(file.badges)?;
        let stats = catalog.stats();
        info!(
            total = stats.total,
            manual = stats.manual,
            automatic_stat = stats.automatic_stat,
            automatic_workout = stats.automatic_workout,
            "Badge catalog loaded from file"
        );
        Ok(catalog)
    }

    fn build(definitions: Vec<BadgeDefinition>) -> Self {
        let definitions: Vec<BadgeDefinition> = definitions
            .into_iter()
            .map(|mut def| {
                if let BadgeKind::AutomaticWorkout { criterion } = &mut def.kind {
                    *criterion = std::mem::take(criterion).normalized();
                }
                def
            })
            .collect();

        let index = definitions
            .iter()
            .enumerate()
            .map(|(i, def)| (def.id.clone(), i))
            .collect();

        Self { definitions, index }
    }

    /// 按 ID 精确查找，未知 ID 返回 None
    pub fn lookup(&self, id: &str) -> Option<&BadgeDefinition> {
        self.index.get(id).map(|&i| &self.definitions[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// 按分类分组，分类按声明顺序，组内保持目录顺序
    pub fn list_by_category(&self) -> BTreeMap<BadgeCategory, Vec<&BadgeDefinition>> {
        let mut grouped: BTreeMap<BadgeCategory, Vec<&BadgeDefinition>> = BTreeMap::new();
        for def in &self.definitions {
            grouped.entry(def.category).or_default().push(def);
        }
        grouped
    }

    /// 全部手动徽章
    pub fn list_manual(&self) -> Vec<&BadgeDefinition> {
        self.definitions.iter().filter(|d| d.is_manual()).collect()
    }

    /// 全部自动徽章（统计类与训练类）
    pub fn list_automatic(&self) -> Vec<&BadgeDefinition> {
        self.definitions.iter().filter(|d| d.is_automatic()).collect()
    }

    /// 按目录顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = &BadgeDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// 导出为目录文件格式
    pub fn to_file(&self) -> CatalogFile {
        CatalogFile {
            badges: self.definitions.clone(),
        }
    }

    /// 获取目录统计信息
    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats {
            total: self.definitions.len(),
            ..Default::default()
        };

        for def in &self.definitions {
            match def.kind {
                BadgeKind::AutomaticStat { .. } => stats.automatic_stat += 1,
                BadgeKind::AutomaticWorkout { .. } => stats.automatic_workout += 1,
                BadgeKind::Manual => stats.manual += 1,
            }
        }

        stats
    }
}

/// 目录统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub total: usize,
    pub manual: usize,
    pub automatic_stat: usize,
    pub automatic_workout: usize,
}
