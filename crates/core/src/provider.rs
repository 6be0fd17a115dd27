//! 값 제공자: 프로퍼티 저장소에서 주입 값을 해석
//!
//! 해석은 항상 호출 시점의 저장소 내용을 기준으로 합니다.
//! setup 훅보다 먼저 해석하면 [`ResolveError::MissingKey`]가 발생합니다.
//!
//! # 플레이스홀더
//! ```text
//! ${some.key}            → 저장소 값 (없으면 MissingKey)
//! ${some.key:fallback}   → 저장소 값, 없으면 "fallback"
//! prefix-${a}-${b}       → 리터럴과 섞어서 사용 가능
//! ```

use std::fmt::Display;
use std::str::FromStr;

use tracing::debug;

use crate::error::ResolveError;
use crate::property::PropertyStore;

/// 저장소를 읽기 전용으로 빌려 값을 해석합니다.
#[derive(Debug, Clone, Copy)]
pub struct ValueProvider<'a> {
    store: &'a PropertyStore,
}

impl<'a> ValueProvider<'a> {
    pub fn new(store: &'a PropertyStore) -> Self {
        Self { store }
    }

    /// 키를 문자열 값으로 해석합니다.
    pub fn resolve(&self, key: &str) -> Result<String, ResolveError> {
        match self.store.get(key) {
            Some(value) => {
                debug!(key, "resolved property");
                Ok(value.to_owned())
            }
            None => Err(ResolveError::MissingKey {
                key: key.to_owned(),
            }),
        }
    }

    /// 키가 없으면 기본값을 돌려줍니다.
    pub fn resolve_or(&self, key: &str, default: &str) -> String {
        self.store.get(key).unwrap_or(default).to_owned()
    }

    /// 키를 해석한 뒤 `T`로 파싱합니다.
    pub fn resolve_parsed<T>(&self, key: &str) -> Result<T, ResolveError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.resolve(key)?;
        raw.parse::<T>().map_err(|e| ResolveError::InvalidValue {
            key: key.to_owned(),
            reason: e.to_string(),
        })
    }

    /// `${key}` / `${key:default}` 플레이스홀더를 치환합니다.
    pub fn expand(&self, template: &str) -> Result<String, ResolveError> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("${") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after
                .find('}')
                .ok_or_else(|| ResolveError::MalformedPlaceholder {
                    template: template.to_owned(),
                    reason: "unterminated placeholder".to_owned(),
                })?;
            let body = &after[..end];
            let (key, default) = match body.split_once(':') {
                Some((key, default)) => (key, Some(default)),
                None => (body, None),
            };
            if key.is_empty() {
                return Err(ResolveError::MalformedPlaceholder {
                    template: template.to_owned(),
                    reason: "empty key".to_owned(),
                });
            }
            match (self.store.get(key), default) {
                (Some(value), _) => out.push_str(value),
                (None, Some(default)) => out.push_str(default),
                (None, None) => {
                    return Err(ResolveError::MissingKey {
                        key: key.to_owned(),
                    });
                }
            }
            rest = &after[end + 1..];
        }

        out.push_str(rest);
        Ok(out)
    }
}
