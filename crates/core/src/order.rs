//! 케이스 실행 순서 결정
//!
//! 케이스는 서로 독립이어야 하므로 러너는 선언 순서를 보장하지 않습니다.
//! `Random` 순서는 시드를 보고서에 남겨 같은 순서로 재실행할 수 있습니다.

use std::fmt;
use std::str::FromStr;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// 케이스 실행 순서 전략
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseOrder {
    /// 등록(선언) 순서
    #[default]
    Declared,
    /// 등록 역순
    Reversed,
    /// 시드 기반 무작위 순서
    Random,
}

impl fmt::Display for CaseOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declared => write!(f, "declared"),
            Self::Reversed => write!(f, "reversed"),
            Self::Random => write!(f, "random"),
        }
    }
}

impl FromStr for CaseOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "declared" => Ok(Self::Declared),
            "reversed" => Ok(Self::Reversed),
            "random" => Ok(Self::Random),
            other => Err(format!(
                "unknown case order '{other}', expected one of: declared, reversed, random"
            )),
        }
    }
}

/// 실행 계획: 케이스 인덱스 순서와 사용한 시드
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    pub order: CaseOrder,
    pub seed: Option<u64>,
    pub indices: Vec<usize>,
}

impl ExecutionPlan {
    /// 선택된 인덱스를 전략에 따라 정렬합니다.
    ///
    /// `Random`에서 시드가 없으면 새로 뽑아 기록합니다.
    pub fn build(order: CaseOrder, seed: Option<u64>, mut indices: Vec<usize>) -> Self {
        let seed = match order {
            CaseOrder::Declared => None,
            CaseOrder::Reversed => {
                indices.reverse();
                None
            }
            CaseOrder::Random => {
                let seed = seed.unwrap_or_else(rand::random);
                let mut rng = StdRng::seed_from_u64(seed);
                indices.shuffle(&mut rng);
                Some(seed)
            }
        };
        Self {
            order,
            seed,
            indices,
        }
    }
}
