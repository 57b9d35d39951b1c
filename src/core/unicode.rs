//! 유니코드 한글 음절 분해/조합 유틸리티

use crate::error::{G2pError, Result};

/// 한글 음절 시작 코드포인트 (가)
pub const HANGUL_SYLLABLE_BASE: u32 = 0xAC00;
/// 한글 음절 마지막 코드포인트 (힣)
pub const HANGUL_SYLLABLE_LAST: u32 = 0xD7A3;

/// 초성 개수
pub const CHOSEONG_COUNT: u32 = 19;
/// 중성 개수
pub const JUNGSEONG_COUNT: u32 = 21;
/// 종성 개수 (종성 없음 포함)
pub const JONGSEONG_COUNT: u32 = 28;

/// 문자 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// 완성형 한글 음절
    HangulSyllable,
    /// 공백 (U+0020)
    Whitespace,
    /// 그 외 문자
    Other,
}

/// 완성형 한글 음절인지 확인
pub fn is_hangul_syllable(c: char) -> bool {
    (HANGUL_SYLLABLE_BASE..=HANGUL_SYLLABLE_LAST).contains(&(c as u32))
}

/// 문자를 한글 음절/공백/기타로 분류
pub fn classify(c: char) -> CharClass {
    if is_hangul_syllable(c) {
        CharClass::HangulSyllable
    } else if c as u32 == 0x20 {
        CharClass::Whitespace
    } else {
        CharClass::Other
    }
}

/// 초성/중성/종성 인덱스로 완성된 한글 음절 생성
/// - choseong: 초성 인덱스 (0~18)
/// - jungseong: 중성 인덱스 (0~20)
/// - jongseong: 종성 인덱스 (0~27, 0 = 종성 없음)
pub fn compose_syllable(choseong: u32, jungseong: u32, jongseong: u32) -> Result<char> {
    let out_of_range = || G2pError::IndexOutOfRange {
        onset: choseong,
        nucleus: jungseong,
        coda: jongseong,
    };
    if choseong >= CHOSEONG_COUNT || jungseong >= JUNGSEONG_COUNT || jongseong >= JONGSEONG_COUNT {
        return Err(out_of_range());
    }
    let code = HANGUL_SYLLABLE_BASE
        + (choseong * JUNGSEONG_COUNT + jungseong) * JONGSEONG_COUNT
        + jongseong;
    char::from_u32(code).ok_or_else(out_of_range)
}

/// 완성형 한글을 초성/중성/종성 인덱스로 분해
/// 반환: (초성 인덱스, 중성 인덱스, 종성 인덱스)
pub fn decompose_syllable(c: char) -> Result<(u32, u32, u32)> {
    if !is_hangul_syllable(c) {
        return Err(G2pError::InvalidCodepoint(c as u32));
    }
    let offset = c as u32 - HANGUL_SYLLABLE_BASE;
    let jongseong = offset % JONGSEONG_COUNT;
    let jungseong = (offset / JONGSEONG_COUNT) % JUNGSEONG_COUNT;
    let choseong = (offset / JONGSEONG_COUNT) / JUNGSEONG_COUNT;
    Ok((choseong, jungseong, jongseong))
}

/// 초성 인덱스에 해당하는 호환용 자모 문자
pub fn choseong_to_jamo_char(cho: u32) -> Option<char> {
    // 호환용 자모: 초성 순서와 다르므로 직접 매핑
    #[rustfmt::skip]
    const JAMO_CODES: [u32; 19] = [
        0x3131, // ㄱ
        0x3132, // ㄲ
        0x3134, // ㄴ
        0x3137, // ㄷ
        0x3138, // ㄸ
        0x3139, // ㄹ
        0x3141, // ㅁ
        0x3142, // ㅂ
        0x3143, // ㅃ
        0x3145, // ㅅ
        0x3146, // ㅆ
        0x3147, // ㅇ
        0x3148, // ㅈ
        0x3149, // ㅉ
        0x314A, // ㅊ
        0x314B, // ㅋ
        0x314C, // ㅌ
        0x314D, // ㅍ
        0x314E, // ㅎ
    ];
    JAMO_CODES.get(cho as usize).and_then(|&code| char::from_u32(code))
}

/// 중성 인덱스에 해당하는 호환용 모음 자모 (ㅏ 0x314F ~ ㅣ 0x3163, 연속 배치)
pub fn jungseong_to_jamo_char(jung: u32) -> Option<char> {
    if jung < JUNGSEONG_COUNT {
        char::from_u32(0x314F + jung)
    } else {
        None
    }
}

/// 종성 인덱스에 해당하는 호환용 자모 문자
/// 0(종성 없음)은 대응 문자가 없으므로 None
pub fn jongseong_to_jamo_char(jong: u32) -> Option<char> {
    #[rustfmt::skip]
    const JAMO_CODES: [u32; 27] = [
        0x3131, // ㄱ
        0x3132, // ㄲ
        0x3133, // ㄳ
        0x3134, // ㄴ
        0x3135, // ㄵ
        0x3136, // ㄶ
        0x3137, // ㄷ
        0x3139, // ㄹ
        0x313A, // ㄺ
        0x313B, // ㄻ
        0x313C, // ㄼ
        0x313D, // ㄽ
        0x313E, // ㄾ
        0x313F, // ㄿ
        0x3140, // ㅀ
        0x3141, // ㅁ
        0x3142, // ㅂ
        0x3144, // ㅄ
        0x3145, // ㅅ
        0x3146, // ㅆ
        0x3147, // ㅇ
        0x3148, // ㅈ
        0x314A, // ㅊ
        0x314B, // ㅋ
        0x314C, // ㅌ
        0x314D, // ㅍ
        0x314E, // ㅎ
    ];
    if jong == 0 {
        return None;
    }
    JAMO_CODES.get(jong as usize - 1).and_then(|&code| char::from_u32(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_syllable() {
        // 가 = 초성 ㄱ(0) + 중성 ㅏ(0) + 종성 없음(0)
        assert_eq!(compose_syllable(0, 0, 0).unwrap(), '가');
        // 각 = 초성 ㄱ(0) + 중성 ㅏ(0) + 종성 ㄱ(1)
        assert_eq!(compose_syllable(0, 0, 1).unwrap(), '각');
        // 한 = 초성 ㅎ(18) + 중성 ㅏ(0) + 종성 ㄴ(4)
        assert_eq!(compose_syllable(18, 0, 4).unwrap(), '한');
        // 아 = 초성 ㅇ(11) + 중성 ㅏ(0)
        assert_eq!(compose_syllable(11, 0, 0).unwrap(), '아');
        assert_eq!(compose_syllable(18, 20, 27).unwrap(), '힣');
    }

    #[test]
    fn test_compose_out_of_range() {
        assert!(matches!(
            compose_syllable(19, 0, 0),
            Err(G2pError::IndexOutOfRange { onset: 19, .. })
        ));
        assert!(compose_syllable(0, 21, 0).is_err());
        assert!(compose_syllable(0, 0, 28).is_err());
    }

    #[test]
    fn test_decompose_syllable() {
        assert_eq!(decompose_syllable('가').unwrap(), (0, 0, 0));
        assert_eq!(decompose_syllable('각').unwrap(), (0, 0, 1));
        assert_eq!(decompose_syllable('한').unwrap(), (18, 0, 4));
        assert_eq!(decompose_syllable('글').unwrap(), (0, 18, 8));
        assert_eq!(decompose_syllable('아').unwrap(), (11, 0, 0));

        // 한글 음절이 아닌 문자
        assert!(matches!(
            decompose_syllable('a'),
            Err(G2pError::InvalidCodepoint(0x61))
        ));
        assert!(decompose_syllable('ㄱ').is_err());
        assert!(decompose_syllable('\u{D7A4}').is_err());
    }

    #[test]
    fn test_roundtrip_all_syllables() {
        for code in HANGUL_SYLLABLE_BASE..=HANGUL_SYLLABLE_LAST {
            let c = char::from_u32(code).unwrap();
            let (cho, jung, jong) = decompose_syllable(c).unwrap();
            assert_eq!(compose_syllable(cho, jung, jong).unwrap(), c);
        }
    }

    #[test]
    fn test_roundtrip_all_indices() {
        for cho in 0..CHOSEONG_COUNT {
            for jung in 0..JUNGSEONG_COUNT {
                for jong in 0..JONGSEONG_COUNT {
                    let c = compose_syllable(cho, jung, jong).unwrap();
                    assert_eq!(decompose_syllable(c).unwrap(), (cho, jung, jong));
                }
            }
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify('사'), CharClass::HangulSyllable);
        assert_eq!(classify(' '), CharClass::Whitespace);
        assert_eq!(classify('\t'), CharClass::Other);
        assert_eq!(classify('ㄱ'), CharClass::Other);
        assert_eq!(classify('A'), CharClass::Other);
    }

    #[test]
    fn test_jamo_chars() {
        assert_eq!(choseong_to_jamo_char(0), Some('ㄱ'));
        assert_eq!(choseong_to_jamo_char(18), Some('ㅎ'));
        assert_eq!(choseong_to_jamo_char(19), None);
        assert_eq!(jungseong_to_jamo_char(0), Some('ㅏ'));
        assert_eq!(jungseong_to_jamo_char(8), Some('ㅗ'));
        assert_eq!(jungseong_to_jamo_char(20), Some('ㅣ'));
        assert_eq!(jungseong_to_jamo_char(21), None);
        assert_eq!(jongseong_to_jamo_char(0), None);
        assert_eq!(jongseong_to_jamo_char(1), Some('ㄱ'));
        assert_eq!(jongseong_to_jamo_char(18), Some('ㅄ'));
        assert_eq!(jongseong_to_jamo_char(21), Some('ㅇ'));
        assert_eq!(jongseong_to_jamo_char(27), Some('ㅎ'));
        assert_eq!(jongseong_to_jamo_char(28), None);
    }
}
