//! 발음 규칙 적용 엔진
//!
//! 규칙 파일의 (패턴, 치환) 쌍을 순서대로 음소열에 적용하고,
//! 음절 경계 `-` 를 무시한 결과가 더 이상 바뀌지 않을 때까지 반복합니다.
//!
//! # 규칙 파일 형식
//!
//! ```text
//! # 주석
//! ,kf,-(nn|mm),	,ng,-\1,
//! ```
//!
//! - `#` 로 시작하는 줄은 주석, 빈 줄은 무시
//! - 패턴과 치환은 탭 하나로 구분 (치환이 비어 있으면 삭제 규칙)
//! - 패턴은 정규식, 치환의 `\1`..`\99` 와 `\g<이름>` 은 캡처 그룹 참조 (`\0` 은 NUL 문자)

use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{G2pError, Result};

/// 기본 최대 반복 횟수
pub const DEFAULT_MAX_PASSES: usize = 100;

/// 내장 규칙 파일
const BUNDLED_RULEBOOK: &str = include_str!("../../data/rulebook.txt");

static REPEATED_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-+").expect("경계 반복 패턴"));

/// 규칙 하나: 정규식 패턴과 치환 문자열
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    /// regex 크레이트 형식으로 변환된 치환 문자열
    replacement: String,
    /// 규칙 파일에 적힌 원래 치환 문자열
    source_replacement: String,
}

impl Rule {
    /// 패턴과 치환 문자열로 규칙 생성
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| G2pError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        let converted = convert_replacement(replacement, &regex)?;
        Ok(Self {
            pattern: regex,
            replacement: converted,
            source_replacement: replacement.to_string(),
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn replacement(&self) -> &str {
        &self.source_replacement
    }

    /// 왼쪽부터 겹치지 않는 모든 일치를 치환
    pub fn apply<'a>(&self, phones: &'a str) -> Cow<'a, str> {
        self.pattern.replace_all(phones, self.replacement.as_str())
    }
}

/// 규칙 생성 에러에 규칙 파일 줄 번호를 붙임
fn at_line(err: G2pError, line: usize) -> G2pError {
    match err {
        G2pError::InvalidPattern { source, .. } => G2pError::InvalidRulePattern { line, source },
        G2pError::InvalidReplacement {
            replacement,
            reason,
        } => G2pError::InvalidRuleReplacement {
            line,
            replacement,
            reason,
        },
        other => other,
    }
}

fn push_literal(out: &mut String, c: char) {
    if c == '$' {
        out.push_str("$$");
    } else {
        out.push(c);
    }
}

/// 규칙 파일의 치환 문자열(`\1`, `\g<name>`, `\n` ...)을 regex 크레이트 형식으로 변환
///
/// - `\1`..`\99`, `\g<N>`, `\g<name>` 은 `${N}`/`${name}` 그룹 참조
/// - `\0`, `\0oo`, 세 자리 8진수 `\ooo` 는 해당 문자
/// - `\a \b \f \n \r \t \v \\` 는 제어 문자와 역슬래시
/// - 그 밖의 영문자 escape, 없는 그룹 참조, 끝에 남은 `\` 는 에러
/// - 리터럴 `$` 는 `$$`
fn convert_replacement(replacement: &str, pattern: &Regex) -> Result<String> {
    let invalid = |reason: String| G2pError::InvalidReplacement {
        replacement: replacement.to_string(),
        reason,
    };
    let check_group = |index: usize| {
        if index < pattern.captures_len() {
            Ok(())
        } else {
            Err(invalid(format!("없는 그룹 참조 {}", index)))
        }
    };

    let mut out = String::with_capacity(replacement.len() + 4);
    let mut chars = replacement.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            push_literal(&mut out, c);
            continue;
        }
        let Some(escaped) = chars.next() else {
            return Err(invalid("끝에 남은 역슬래시".to_string()));
        };

        match escaped {
            'g' => {
                if chars.next() != Some('<') {
                    return Err(invalid("\\g 뒤에 <그룹> 이 없음".to_string()));
                }
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('>') => break,
                        Some(ch) => name.push(ch),
                        None => return Err(invalid("닫히지 않은 \\g<".to_string())),
                    }
                }
                if !name.is_empty() && name.chars().all(|ch| ch.is_ascii_digit()) {
                    let index = name
                        .parse::<usize>()
                        .map_err(|_| invalid(format!("잘못된 그룹 번호 {}", name)))?;
                    check_group(index)?;
                    out.push_str(&format!("${{{}}}", index));
                } else if pattern.capture_names().any(|n| n == Some(name.as_str())) {
                    out.push_str(&format!("${{{}}}", name));
                } else {
                    return Err(invalid(format!("없는 그룹 이름 {:?}", name)));
                }
            }
            '0' => {
                // 최대 두 자리 8진수 추가
                let mut value = 0u32;
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                push_literal(&mut out, char::from(value as u8));
            }
            '1'..='9' => {
                let mut digits = vec![escaped];
                if let Some(&second) = chars.peek().filter(|d| d.is_ascii_digit()) {
                    chars.next();
                    digits.push(second);
                    let third = chars.peek().copied().filter(|d| d.is_digit(8));
                    if let (true, true, Some(third)) =
                        (escaped.is_digit(8), second.is_digit(8), third)
                    {
                        chars.next();
                        let value = digits
                            .iter()
                            .chain(std::iter::once(&third))
                            .filter_map(|d| d.to_digit(8))
                            .fold(0u32, |acc, d| acc * 8 + d);
                        if value > 0o377 {
                            return Err(invalid(format!("8진수 escape 범위 초과 \\{:o}", value)));
                        }
                        push_literal(&mut out, char::from(value as u8));
                        continue;
                    }
                }
                let index = digits
                    .iter()
                    .filter_map(|d| d.to_digit(10))
                    .fold(0usize, |acc, d| acc * 10 + d as usize);
                check_group(index)?;
                out.push_str(&format!("${{{}}}", index));
            }
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{0B}'),
            '\\' => out.push('\\'),
            other if other.is_ascii_alphabetic() => {
                return Err(invalid(format!("알 수 없는 escape \\{}", other)));
            }
            other => {
                out.push('\\');
                push_literal(&mut out, other);
            }
        }
    }

    Ok(out)
}

/// 수렴 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Convergence {
    /// 공백으로 구분된 최종 음소열
    pub output: String,
    /// 전체 규칙 적용 횟수 (첫 적용 포함)
    pub passes: usize,
}

/// 순서가 있는 규칙 목록
///
/// 한 번 읽은 뒤에는 변경되지 않으므로 여러 변환 호출에서 공유해도 안전합니다.
#[derive(Debug, Clone, Default)]
pub struct Rulebook {
    rules: Vec<Rule>,
}

impl Rulebook {
    /// 규칙 목록으로 생성
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// 내장 규칙 파일 로드
    pub fn bundled() -> Result<Self> {
        Self::parse(BUNDLED_RULEBOOK)
    }

    /// 규칙 파일 로드
    ///
    /// 한 줄이라도 잘못되면 전체가 실패하며 일부만 적용된 규칙집은 반환하지 않습니다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| G2pError::RulebookLoad {
            path: path.to_path_buf(),
            source,
        })?;
        let rulebook = Self::parse(&text)?;
        log::debug!("규칙 {}개 로드: {}", rulebook.len(), path.display());
        Ok(rulebook)
    }

    /// 규칙 파일 내용 파싱
    pub fn parse(text: &str) -> Result<Self> {
        let mut rules = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim_end_matches('\r');
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split('\t');
            let (Some(pattern), Some(replacement), None) =
                (fields.next(), fields.next(), fields.next())
            else {
                return Err(G2pError::MalformedRuleLine {
                    line: line_no,
                    content: line.to_string(),
                });
            };

            rules.push(Rule::new(pattern, replacement).map_err(|e| at_line(e, line_no))?);
        }

        Ok(Self { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// 모든 규칙을 순서대로 한 번씩 적용 (뒤 규칙은 앞 규칙의 결과를 봄)
    pub fn sweep(&self, phones: &str) -> String {
        self.rules
            .iter()
            .fold(phones.to_string(), |acc, rule| rule.apply(&acc).into_owned())
    }

    /// 음소 경계가 표시된 음소열에 규칙을 고정점까지 반복 적용
    ///
    /// 첫 적용에서 아무것도 바뀌지 않으면 1회로 수렴합니다.
    /// `max_passes` 번 적용해도 수렴하지 않으면 `Diverged`, `max_passes` 가 0 이면 `InvalidMaxPasses`.
    pub fn apply(&self, tokens: &str, max_passes: usize) -> Result<Convergence> {
        if max_passes == 0 {
            return Err(G2pError::InvalidMaxPasses(max_passes));
        }

        let mut prev = normalize_boundaries(&detokenize(&self.sweep(tokens)));
        let mut passes = 1;

        if retokenize(&prev) == tokens {
            return Ok(Convergence {
                output: prev,
                passes,
            });
        }

        loop {
            if passes >= max_passes {
                return Err(G2pError::Diverged { passes, last: prev });
            }

            let next = detokenize(&self.sweep(&retokenize(&prev)));
            passes += 1;

            if strip_boundaries(&prev) == strip_boundaries(&next) {
                return Ok(Convergence {
                    output: next,
                    passes,
                });
            }
            log::trace!("규칙 재적용 {}회: {} -> {}", passes, prev, next);
            prev = next;
        }
    }

    /// 한 번 더 적용해도 (경계 무시) 같은 결과인지 확인
    pub fn is_fixed_point(&self, phones: &str) -> bool {
        let next = detokenize(&self.sweep(&retokenize(phones)));
        strip_boundaries(phones) == strip_boundaries(&next)
    }
}

/// 공백 구분 음소열을 규칙 적용용 `,` 구분 형식으로
fn retokenize(phones: &str) -> String {
    let mut tokens = phones.replace(' ', ",");
    tokens.push(',');
    tokens
}

/// `,` 를 공백으로 바꾸고 끝 공백 제거
fn detokenize(tokens: &str) -> String {
    tokens.replace(',', " ").trim_end_matches(' ').to_string()
}

/// 어절 경계 `#` 를 `-` 로, 연속된 `-` 는 하나로
fn normalize_boundaries(phones: &str) -> String {
    REPEATED_BOUNDARY
        .replace_all(&phones.replace('#', "-"), "-")
        .into_owned()
}

fn strip_boundaries(phones: &str) -> String {
    phones.replace('-', "")
}
