//! 음소열 <-> 한글 자모열 <-> 출력 기호 변환

use serde::{Deserialize, Serialize};

use crate::core::tables::{
    grapheme_index, graphemes, is_coda_phone, is_effective_coda, is_onset_phone, phone_index,
    Position, CODA_SYMBOLS, CODA_SYMBOLS_IPA, NUCLEUS_SYMBOLS, NUCLEUS_SYMBOLS_IPA, NO_CODA,
    ONSET_SYMBOLS, ONSET_SYMBOLS_IPA, SILENT_ONSET, VELAR_NASAL,
};
use crate::core::unicode::{compose_syllable, decompose_syllable, is_hangul_syllable};
use crate::error::{G2pError, Result};

/// 빈 발음에 대한 출력 기호 (묵음)
pub const SILENCE: &str = "SIL";

/// 형태소 경계 표시
pub const MORPHEME_BOUNDARY: char = '+';

/// 자모열 안의 어절 구분 문자
const WORD_BREAKS: [char; 2] = ['/', ':'];

/// 출력 기호 체계
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alphabet {
    /// 간결한 로마자 기호 (g, a, ng ...)
    #[default]
    Compact,
    /// 국제 음성 기호
    Ipa,
}

impl Alphabet {
    fn symbol(self, position: Position, index: usize) -> &'static str {
        let table: &[&str] = match (self, position) {
            (Alphabet::Compact, Position::Onset) => &ONSET_SYMBOLS[..],
            (Alphabet::Compact, Position::Nucleus) => &NUCLEUS_SYMBOLS[..],
            (Alphabet::Compact, Position::Coda) => &CODA_SYMBOLS[..],
            (Alphabet::Ipa, Position::Onset) => &ONSET_SYMBOLS_IPA[..],
            (Alphabet::Ipa, Position::Nucleus) => &NUCLEUS_SYMBOLS_IPA[..],
            (Alphabet::Ipa, Position::Coda) => &CODA_SYMBOLS_IPA[..],
        };
        table[index]
    }
}

fn phone_to_grapheme(position: Position, phone: &str) -> Result<char> {
    phone_index(position, phone)
        .map(|idx| graphemes(position)[idx])
        .ok_or_else(|| G2pError::UnknownPhone {
            phone: phone.to_string(),
            position: position.name(),
        })
}

/// 수렴한 음소열(공백 구분)을 한글 자모열로 변환
///
/// 음절마다 초성/중성/종성 세 자모를 채웁니다. 초성이 없으면 `ㅇ`,
/// 종성이 없으면 `_` 를 넣습니다.
///
/// ```
/// use kog2p::core::symbols::to_graph_seq;
/// assert_eq!(to_graph_seq("s0 aa -rr aa mf").unwrap(), "ㅅㅏ_ㄹㅏㅁ");
/// ```
pub fn to_graph_seq(phones: &str) -> Result<String> {
    let mut graphs: Vec<char> = Vec::new();
    // 0: 초성, 1: 중성, 2: 종성
    let mut count = 0usize;

    for token in phones.split_whitespace() {
        let mut expected = count;
        let phone = token.trim_start_matches('-');
        let onset = is_onset_phone(phone);

        if token.starts_with('-') {
            count = if onset { 0 } else { 1 };
        } else if expected == 0 && !onset {
            count = 1;
        }
        if expected == 2 {
            if !is_coda_phone(phone) {
                count = if phone == VELAR_NASAL {
                    2
                } else if onset {
                    0
                } else {
                    1
                };
            } else if onset {
                // 초성으로도 쓰이는 종성 코드는 다음 음절 초성으로 본다
                count = 0;
            }
            if count != expected {
                graphs.push(NO_CODA);
                expected = 0;
            }
        }
        if expected == 0 && count != expected {
            graphs.push(SILENT_ONSET);
        }

        let grapheme = match count {
            0 => phone_to_grapheme(Position::Onset, phone)?,
            1 => phone_to_grapheme(Position::Nucleus, phone)?,
            _ if phone == VELAR_NASAL => 'ㅇ',
            _ => {
                if !is_effective_coda(phone) {
                    log::warn!("대표음이 아닌 종성 사용: {}", phone);
                }
                phone_to_grapheme(Position::Coda, phone)?
            }
        };
        graphs.push(grapheme);

        count = if count == 2 { 0 } else { count + 1 };
    }

    // 마지막 음절의 종성 채우기
    if count == 2 {
        graphs.push(NO_CODA);
    }

    // ㅎ 으로 끝나는 어절 보정: (_, ㅎ) -> ㅅ
    let len = graphs.len();
    if len >= 2 && graphs[len - 2] == NO_CODA && graphs[len - 1] == 'ㅎ' {
        graphs[len - 2] = 'ㅅ';
        graphs.pop();
    }

    Ok(graphs.into_iter().collect())
}

/// 한글 자모열을 출력 기호열로 변환 (공백 구분)
///
/// 자모 위치는 순서대로 초성/중성/종성을 반복한다고 봅니다.
/// 빈 입력은 `SIL`.
pub fn pronun_to_symbols(graphs: &str, alphabet: Alphabet) -> Result<String> {
    if graphs.is_empty() {
        return Ok(SILENCE.to_string());
    }

    let mut symbols: Vec<&str> = Vec::new();
    let mut cycle = 0usize;

    for grapheme in graphs.chars() {
        if grapheme == ' ' {
            continue;
        }
        if grapheme == MORPHEME_BOUNDARY {
            symbols.push("+");
            continue;
        }

        let position = Position::from_cycle(cycle);
        cycle += 1;
        let index = grapheme_index(position, grapheme).ok_or(G2pError::UnknownGrapheme {
            grapheme,
            position: position.name(),
        })?;
        let symbol = alphabet.symbol(position, index);
        if !symbol.is_empty() {
            symbols.push(symbol);
        }
    }

    Ok(symbols.join(" "))
}

/// 자모열(음절당 3자모, `/` 또는 `:` = 어절 구분)을 한글 음절 문자열로 조합
pub fn to_hangul(graphs: &str) -> Result<String> {
    let chars: Vec<char> = graphs.chars().collect();
    let jamo_count = chars.iter().filter(|&&c| !WORD_BREAKS.contains(&c)).count();
    if jamo_count % 3 != 0 {
        return Err(G2pError::MalformedGraphemeSequence {
            len: jamo_count,
            graphemes: graphs.to_string(),
        });
    }

    let lookup = |position: Position, grapheme: char| {
        grapheme_index(position, grapheme)
            .map(|idx| idx as u32)
            .ok_or(G2pError::UnknownGrapheme {
                grapheme,
                position: position.name(),
            })
    };

    let mut out = String::with_capacity(jamo_count);
    let mut pos = 0;
    while pos < chars.len() {
        if WORD_BREAKS.contains(&chars[pos]) {
            out.push(' ');
            pos += 1;
            continue;
        }
        // 길이 검사를 통과했어도 어절 구분이 음절 중간에 끼면 잘못된 입력
        let syllable = chars
            .get(pos..pos + 3)
            .filter(|s| !s.iter().any(|c| WORD_BREAKS.contains(c)))
            .ok_or_else(|| G2pError::MalformedGraphemeSequence {
                len: jamo_count,
                graphemes: graphs.to_string(),
            })?;
        out.push(compose_syllable(
            lookup(Position::Onset, syllable[0])?,
            lookup(Position::Nucleus, syllable[1])?,
            lookup(Position::Coda, syllable[2])?,
        )?);
        pos += 3;
    }

    Ok(out)
}

/// 문장을 자모열로 풀어 씀 (`to_hangul` 의 역변환)
///
/// 한글 음절과 공백 이외의 문자는 버리고, 공백은 `/` 로 표시합니다.
pub fn to_phoneme_string(sentence: &str) -> String {
    let text: String = sentence
        .chars()
        .filter(|&c| c == ' ' || is_hangul_syllable(c))
        .collect();

    let mut out = String::with_capacity(text.len() * 3);
    for c in text.trim().chars() {
        if c == ' ' {
            out.push('/');
            continue;
        }
        if let Ok((cho, jung, jong)) = decompose_syllable(c) {
            out.push(graphemes(Position::Onset)[cho as usize]);
            out.push(graphemes(Position::Nucleus)[jung as usize]);
            out.push(graphemes(Position::Coda)[jong as usize]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_graph_seq_basic() {
        assert_eq!(to_graph_seq("s0 aa -rr aa mf").unwrap(), "ㅅㅏ_ㄹㅏㅁ");
        assert_eq!(to_graph_seq("k0 uu ng -mm uu ll").unwrap(), "ㄱㅜㅇㅁㅜㄹ");
    }

    #[test]
    fn test_to_graph_seq_missing_onset() {
        // 조아
        assert_eq!(to_graph_seq("c0 oo -aa").unwrap(), "ㅈㅗ_ㅇㅏ_");
        // 이써
        assert_eq!(to_graph_seq("ii -ss vv").unwrap(), "ㅇㅣ_ㅆㅓ_");
        assert_eq!(to_graph_seq("aa").unwrap(), "ㅇㅏ_");
    }

    #[test]
    fn test_to_graph_seq_final_h_correction() {
        // 어말 ㅎ 은 초성으로 읽힌 뒤 종성 ㅅ 으로 보정
        assert_eq!(to_graph_seq("c0 oo h0").unwrap(), "ㅈㅗㅅ");
    }

    #[test]
    fn test_to_graph_seq_unknown_phone() {
        assert!(matches!(
            to_graph_seq("zz"),
            Err(G2pError::UnknownPhone { ref phone, .. }) if phone == "zz"
        ));
    }

    #[test]
    fn test_to_graph_seq_empty() {
        assert_eq!(to_graph_seq("").unwrap(), "");
    }

    #[test]
    fn test_pronun_to_symbols() {
        assert_eq!(pronun_to_symbols("", Alphabet::Compact).unwrap(), "SIL");
        assert_eq!(
            pronun_to_symbols("ㅅㅏ_ㄹㅏㅁ", Alphabet::Compact).unwrap(),
            "s a l a m2"
        );
        assert_eq!(
            pronun_to_symbols("ㄱㅜㅇㅁㅜㄹ", Alphabet::Compact).unwrap(),
            "g u ng m u l2"
        );
        // 초성 ㅇ 과 종성 없음은 기호를 내지 않음
        assert_eq!(pronun_to_symbols("ㅇㅏ_", Alphabet::Compact).unwrap(), "a");
    }

    #[test]
    fn test_pronun_to_symbols_ipa() {
        assert_eq!(
            pronun_to_symbols("ㅅㅏ_ㄹㅏㅁ", Alphabet::Ipa).unwrap(),
            "sʰ a ɾ a m"
        );
    }

    #[test]
    fn test_pronun_to_symbols_morpheme_boundary() {
        assert_eq!(
            pronun_to_symbols("ㅅㅏ_+ㄹㅏㅁ", Alphabet::Compact).unwrap(),
            "s a + l a m2"
        );
    }

    #[test]
    fn test_pronun_to_symbols_unknown_grapheme() {
        let err = pronun_to_symbols("ㅏㅏ_", Alphabet::Compact).unwrap_err();
        assert!(matches!(
            err,
            G2pError::UnknownGrapheme { grapheme: 'ㅏ', position: "초성" }
        ));
    }

    #[test]
    fn test_to_hangul() {
        assert_eq!(to_hangul("ㅅㅏ_ㄹㅏㅁ").unwrap(), "사람");
        assert_eq!(to_hangul("ㄱㅏ_/ㄴㅏ_").unwrap(), "가 나");
        assert_eq!(to_hangul("ㅈㅗㅅ").unwrap(), "좃");
        assert!(matches!(
            to_hangul("ㅅㅏ"),
            Err(G2pError::MalformedGraphemeSequence { len: 2, .. })
        ));
        assert!(matches!(
            to_hangul("ㅏㅏ_"),
            Err(G2pError::UnknownGrapheme { .. })
        ));
    }

    #[test]
    fn test_to_phoneme_string() {
        assert_eq!(to_phoneme_string("가 나!"), "ㄱㅏ_/ㄴㅏ_");
        assert_eq!(to_phoneme_string(" 한글 "), "ㅎㅏㄴㄱㅡㄹ");
        for text in ["사람", "뒤 에서 실탄 장전", "힣"] {
            assert_eq!(to_hangul(&to_phoneme_string(text)).unwrap(), text);
        }
    }
}
