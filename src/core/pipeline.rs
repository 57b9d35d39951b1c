//! 텍스트 -> 발음/음소 기호 변환 파이프라인
//!
//! 어절마다 로마자 변환 -> 음소 경계 표시 -> 규칙 고정점 적용 ->
//! 자모열 복원 -> 출력 기호 변환 순으로 처리합니다.
//! 규칙집은 [`G2p`] 생성 시 한 번만 읽고 모든 어절에 재사용합니다.

use crate::config::G2pConfig;
use crate::core::romanizer::{add_phone_boundary, romanize};
use crate::core::rules::Rulebook;
use crate::core::symbols::{pronun_to_symbols, to_graph_seq, to_hangul};
use crate::core::unicode::is_hangul_syllable;
use crate::error::{G2pError, Result};

/// 어절 하나의 변환 결과 (중간 단계 포함)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordConversion {
    /// 로마자 음소열
    pub romanized: String,
    /// 음소 경계가 표시된 음소열
    pub tokens: String,
    /// 규칙 적용 후 수렴한 음소열 (공백 구분)
    pub phones: String,
    /// 초성/중성/종성 자모열
    pub graphemes: String,
    /// 발음 (한글)
    pub pronunciation: String,
    /// 출력 기호열
    pub symbols: Vec<String>,
}

/// 변환에 실패한 어절
#[derive(Debug)]
pub struct WordFailure {
    pub word: String,
    pub error: G2pError,
}

/// 텍스트 전체 변환 결과
#[derive(Debug, Default)]
pub struct Conversion {
    /// 모든 어절의 출력 기호 (순서 유지)
    pub phone_symbols: Vec<String>,
    /// 어절별 발음 (순서 유지)
    pub pronunciations: Vec<String>,
    /// 실패한 어절
    pub failures: Vec<WordFailure>,
}

impl Conversion {
    /// 실패한 어절 없이 모두 변환되었는지
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// 규칙집과 설정을 가진 변환기
///
/// 변환 중에는 내부 상태를 바꾸지 않으므로 `&G2p` 로 여러 스레드에서 공유할 수 있습니다.
#[derive(Debug, Clone)]
pub struct G2p {
    rulebook: Rulebook,
    config: G2pConfig,
}

impl G2p {
    pub fn new(rulebook: Rulebook, config: G2pConfig) -> Self {
        Self { rulebook, config }
    }

    /// 설정의 규칙 파일(없으면 내장 규칙)로 변환기 생성
    pub fn from_config(config: G2pConfig) -> Result<Self> {
        if config.max_passes == 0 {
            return Err(G2pError::InvalidMaxPasses(config.max_passes));
        }
        let rulebook = match &config.rulebook_path {
            Some(path) => Rulebook::load(path)?,
            None => Rulebook::bundled()?,
        };
        Ok(Self::new(rulebook, config))
    }

    /// 내장 규칙과 기본 설정으로 변환기 생성
    pub fn bundled() -> Result<Self> {
        Self::from_config(G2pConfig::default())
    }

    pub fn config(&self) -> &G2pConfig {
        &self.config
    }

    pub fn rulebook(&self) -> &Rulebook {
        &self.rulebook
    }

    /// 한글 음절/공백 연속열 하나를 변환
    pub fn convert_word(&self, word: &str) -> Result<WordConversion> {
        let romanized = romanize(word);
        let tokens = add_phone_boundary(&romanized);
        let convergence = self.rulebook.apply(&tokens, self.config.max_passes)?;
        let phones = convergence.output;
        let graphemes = to_graph_seq(&phones)?;
        let pronunciation = to_hangul(&graphemes)?;
        let symbols = pronun_to_symbols(&graphemes, self.config.alphabet)?
            .split_whitespace()
            .map(str::to_string)
            .collect();

        if self.config.verbose {
            log::info!("=> 로마자: {}", romanized);
            log::info!("=> 음소 경계: {}", tokens);
            log::info!("=> 규칙 적용 {}회 후 수렴: {}", convergence.passes, phones);
            log::info!("=> 발음: {} ({})", pronunciation, graphemes);
        } else {
            log::debug!("{} -> {} ({}회)", word, phones, convergence.passes);
        }

        Ok(WordConversion {
            romanized,
            tokens,
            phones,
            graphemes,
            pronunciation,
            symbols,
        })
    }

    /// 문장 한 줄을 어절 구분 없이 한 번에 변환
    ///
    /// 한글 음절과 공백 이외의 문자는 버리고 연속 공백은 하나로 줄입니다.
    /// 어절 경계를 넘는 규칙도 적용됩니다.
    pub fn convert_sentence(&self, line: &str) -> Result<WordConversion> {
        let cleaned: String = line
            .chars()
            .map(|c| if c.is_whitespace() { ' ' } else { c })
            .filter(|&c| c == ' ' || is_hangul_syllable(c))
            .collect();
        let normalized = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
        self.convert_word(&normalized)
    }

    /// 텍스트를 공백 단위 어절로 나누어 변환
    ///
    /// 어절 하나가 실패해도 나머지 어절은 계속 변환하며 실패는 `failures` 에 모읍니다.
    pub fn convert(&self, text: &str) -> Conversion {
        let mut conversion = Conversion::default();

        for raw in text.split_whitespace() {
            let word: String = raw.chars().filter(|&c| is_hangul_syllable(c)).collect();
            if word.is_empty() {
                log::debug!("한글이 없는 어절 건너뜀: {:?}", raw);
                continue;
            }

            match self.convert_word(&word) {
                Ok(result) => {
                    conversion.phone_symbols.extend(result.symbols);
                    conversion.pronunciations.push(result.pronunciation);
                }
                Err(error) => {
                    log::warn!("어절 변환 실패 {:?}: {}", raw, error);
                    conversion.failures.push(WordFailure {
                        word: raw.to_string(),
                        error,
                    });
                }
            }
        }

        conversion
    }
}

/// 내장 규칙으로 텍스트 변환
///
/// ```
/// let result = kog2p::convert("사람").unwrap();
/// assert_eq!(result.pronunciations, vec!["사람"]);
/// assert_eq!(result.phone_symbols, vec!["s", "a", "l", "a", "m2"]);
/// ```
pub fn convert(text: &str) -> Result<Conversion> {
    Ok(G2p::bundled()?.convert(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rules::Rule;
    use crate::core::symbols::Alphabet;

    fn g2p() -> G2p {
        G2p::bundled().unwrap()
    }

    #[test]
    fn test_convert_word_stages() {
        let result = g2p().convert_word("사람").unwrap();
        assert_eq!(result.romanized, "s0aa-rraamf");
        assert_eq!(result.tokens, "s0,aa,-rr,aa,mf,");
        assert_eq!(result.phones, "s0 aa -rr aa mf");
        assert_eq!(result.graphemes, "ㅅㅏ_ㄹㅏㅁ");
        assert_eq!(result.pronunciation, "사람");
        assert_eq!(result.symbols, vec!["s", "a", "l", "a", "m2"]);
    }

    #[test]
    fn test_convert_word_pronunciation_rules() {
        let g2p = g2p();
        for (word, expected) in [
            ("국물", "궁물"),
            ("신라", "실라"),
            ("같이", "가치"),
            ("좋아", "조아"),
            ("먹었어", "머거써"),
            ("읽다", "익따"),
            ("값", "갑"),
            ("강아지", "강아지"),
            ("맛없다", "마덥따"),
            ("젊다", "점따"),
            ("넓게", "널께"),
            ("밟다", "밥따"),
            ("밟는", "밤는"),
        ] {
            assert_eq!(g2p.convert_word(word).unwrap().pronunciation, expected, "{}", word);
        }
    }

    #[test]
    fn test_final_h_legacy_correction() {
        let result = g2p().convert_word("좋").unwrap();
        assert_eq!(result.phones, "c0 oo h0");
        assert_eq!(result.graphemes, "ㅈㅗㅅ");
        assert_eq!(result.pronunciation, "좃");
    }

    #[test]
    fn test_convert_ipa() {
        let g2p = G2p::from_config(G2pConfig::new().with_alphabet(Alphabet::Ipa)).unwrap();
        let result = g2p.convert("사람");
        assert_eq!(result.phone_symbols, vec!["sʰ", "a", "ɾ", "a", "m"]);
    }

    #[test]
    fn test_convert_multiple_words() {
        let result = g2p().convert("사람 국물");
        assert!(result.is_complete());
        assert_eq!(result.pronunciations, vec!["사람", "궁물"]);
        assert_eq!(
            result.phone_symbols,
            vec!["s", "a", "l", "a", "m2", "g", "u", "ng", "m", "u", "l2"]
        );
    }

    #[test]
    fn test_convert_strips_non_hangul() {
        let result = g2p().convert("사람! abc 123");
        assert_eq!(result.pronunciations, vec!["사람"]);
        assert!(result.is_complete());
        assert!(g2p().convert("").pronunciations.is_empty());
    }

    #[test]
    fn test_word_failure_does_not_abort_batch() {
        // 모든 모음을 알 수 없는 음소로 바꾸는 규칙집
        let rulebook = Rulebook::new(vec![Rule::new(",aa,", ",zz,").unwrap()]);
        let g2p = G2p::new(rulebook, G2pConfig::default());
        let result = g2p.convert("가 국 나");
        assert_eq!(result.pronunciations, vec!["국"]);
        assert_eq!(result.failures.len(), 2);
        assert_eq!(result.failures[0].word, "가");
        assert!(matches!(result.failures[0].error, G2pError::UnknownPhone { .. }));
    }

    #[test]
    fn test_diverging_word_reported() {
        let rulebook = Rulebook::new(vec![
            Rule::new("aa", "cc").unwrap(),
            Rule::new("bb", "aa").unwrap(),
            Rule::new("cc", "bb").unwrap(),
        ]);
        let g2p = G2p::new(rulebook, G2pConfig::new().with_max_passes(10));
        let result = g2p.convert("가 국");
        assert_eq!(result.pronunciations, vec!["국"]);
        assert!(matches!(result.failures[0].error, G2pError::Diverged { .. }));
    }

    #[test]
    fn test_single_pass_limit() {
        // 바꿀 규칙이 없으면 한 번의 적용으로 충분
        let g2p = G2p::new(Rulebook::default(), G2pConfig::new().with_max_passes(1));
        assert_eq!(g2p.convert_word("사람").unwrap().pronunciation, "사람");

        let config = G2pConfig::new().with_max_passes(0);
        assert!(matches!(
            G2p::from_config(config),
            Err(G2pError::InvalidMaxPasses(0))
        ));
        let g2p = G2p::new(Rulebook::default(), G2pConfig::new().with_max_passes(0));
        assert!(matches!(
            g2p.convert_word("사람"),
            Err(G2pError::InvalidMaxPasses(0))
        ));
    }

    #[test]
    fn test_convert_sentence() {
        let result = g2p().convert_sentence("사람  가!").unwrap();
        assert_eq!(result.romanized, "s0aa-rraamf#k0aa");
        assert_eq!(result.phones, "s0 aa -rr aa mf -k0 aa");
        assert_eq!(result.pronunciation, "사람가");
    }

    #[test]
    fn test_from_config_missing_rulebook() {
        let config = G2pConfig::new().with_rulebook_path("/nonexistent/rulebook.txt");
        assert!(matches!(
            G2p::from_config(config),
            Err(G2pError::RulebookLoad { .. })
        ));
    }

    #[test]
    fn test_g2p_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<G2p>();
    }
}
