//! 변환 설정 로드/저장 (JSON)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::rules::DEFAULT_MAX_PASSES;
use crate::core::symbols::Alphabet;
use crate::error::Result;

/// G2P 변환 설정
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct G2pConfig {
    /// 중간 변환 단계(로마자, 경계 표시, 규칙 적용 결과) 로그 출력 여부
    #[serde(default)]
    pub verbose: bool,
    /// 출력 기호 체계
    #[serde(default)]
    pub alphabet: Alphabet,
    /// 규칙 반복 적용 최대 횟수
    #[serde(default = "default_max_passes")]
    pub max_passes: usize,
    /// 규칙 파일 경로 (없으면 내장 규칙)
    #[serde(default)]
    pub rulebook_path: Option<PathBuf>,
}

fn default_max_passes() -> usize {
    DEFAULT_MAX_PASSES
}

impl Default for G2pConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            alphabet: Alphabet::default(),
            max_passes: default_max_passes(),
            rulebook_path: None,
        }
    }
}

impl G2pConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    pub fn with_rulebook_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.rulebook_path = Some(path.into());
        self
    }
}

/// 기본 설정 파일 경로: ~/.config/kog2p/config.json
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .filter(|p| p.is_absolute() && p.is_dir())
        .unwrap_or_else(|| PathBuf::from("/var/tmp"));
    home.join(".config").join("kog2p").join("config.json")
}

/// 설정 파일 로드 (파일 없거나 파싱 실패 시 기본값)
pub fn load_config(path: &Path) -> G2pConfig {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("설정 파일 파싱 실패, 기본값 사용 ({}): {}", path.display(), e);
            G2pConfig::default()
        }),
        Err(_) => G2pConfig::default(),
    }
}

/// 기본 경로의 설정 파일 로드
pub fn load_default_config() -> G2pConfig {
    load_config(&config_path())
}

/// 설정 파일 저장
pub fn save_config(config: &G2pConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}
