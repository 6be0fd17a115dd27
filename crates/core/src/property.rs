//! 프로퍼티 저장소: 스위트 범위의 키/값 상태
//!
//! [`PropertyStore`]는 프로세스 전역 상태 대신 스위트 실행마다 하나씩
//! 만들어 넘기는 명시적 컨텍스트입니다.
//!
//! - setup / teardown 훅은 `&mut PropertyStore`를 받아 값을 설정/해제합니다.
//! - 테스트 케이스는 `&PropertyStore`만 받으므로 상태를 바꿀 수 없습니다.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::PropertyError;

/// 키에 사용할 수 없는 문자 (플레이스홀더 구문과 충돌)
const RESERVED_KEY_CHARS: &[char] = &['$', '{', '}', ':'];

/// 스위트 범위 키/값 저장소
///
/// 역직렬화도 [`PropertyStore::from_pairs`]를 거치므로 키 검증을 우회할 수 없습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    into = "BTreeMap<String, String>",
    try_from = "BTreeMap<String, String>"
)]
pub struct PropertyStore {
    entries: BTreeMap<String, String>,
}

impl PropertyStore {
    /// 빈 저장소를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 키/값 쌍 목록으로 저장소를 생성합니다.
    ///
    /// 키 하나라도 유효하지 않으면 에러를 반환합니다.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self, PropertyError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut store = Self::new();
        for (key, value) in pairs {
            store.set(key, value)?;
        }
        Ok(store)
    }

    /// 값을 설정하고 이전 값을 반환합니다.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Option<String>, PropertyError> {
        let key = key.into();
        validate_key(&key)?;
        Ok(self.entries.insert(key, value.into()))
    }

    /// 값을 조회합니다.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// 키를 제거하고 제거된 값을 반환합니다.
    pub fn clear(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// 모든 키를 제거합니다.
    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    /// 키 존재 여부를 반환합니다.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 정렬된 키 목록을 반환합니다.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

fn validate_key(key: &str) -> Result<(), PropertyError> {
    if key.is_empty() {
        return Err(PropertyError::InvalidKey {
            key: key.to_owned(),
            reason: "key must not be empty".to_owned(),
        });
    }
    if key.chars().any(char::is_whitespace) {
        return Err(PropertyError::InvalidKey {
            key: key.to_owned(),
            reason: "key must not contain whitespace".to_owned(),
        });
    }
    if key.contains(RESERVED_KEY_CHARS) {
        return Err(PropertyError::InvalidKey {
            key: key.to_owned(),
            reason: "key must not contain any of '$', '{', '}', ':'".to_owned(),
        });
    }
    Ok(())
}

impl TryFrom<BTreeMap<String, String>> for PropertyStore {
    type Error = PropertyError;

    fn try_from(entries: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        Self::from_pairs(entries)
    }
}

impl From<PropertyStore> for BTreeMap<String, String> {
    fn from(store: PropertyStore) -> Self {
        store.entries
    }
}
