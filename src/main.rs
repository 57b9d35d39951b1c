//! kog2p - 한국어 발음 변환 명령줄 도구
//!
//! 입력 파일(없으면 표준 입력)을 한 줄씩 읽어 변환합니다.
//! 기본 출력은 `<음소열>\t<자모열>`, `--words` 는 `<어절별 발음>\t<기호열>`.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use kog2p::config::{load_config, load_default_config};
use kog2p::{Alphabet, G2p};

/// 한국어 G2P 변환기
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// 입력 파일 (생략하면 표준 입력)
    infile: Option<PathBuf>,

    /// 변환 중간 단계를 로그로 출력
    #[arg(short, long)]
    verbose: bool,

    /// IPA 기호로 출력
    #[arg(long)]
    ipa: bool,

    /// 어절 단위로 변환하여 발음과 기호열 출력
    #[arg(long)]
    words: bool,

    /// 규칙 파일 (생략하면 내장 규칙)
    #[arg(long)]
    rulebook: Option<PathBuf>,

    /// 설정 파일 (생략하면 ~/.config/kog2p/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// 규칙 반복 적용 최대 횟수 (1 이상)
    #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    max_passes: Option<usize>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // 설정 로드 후 명령줄 옵션으로 덮어쓰기
    let mut config = match &cli.config {
        Some(path) => load_config(path),
        None => load_default_config(),
    };
    config.verbose |= cli.verbose;
    if cli.ipa {
        config.alphabet = Alphabet::Ipa;
    }
    if let Some(path) = cli.rulebook.clone() {
        config.rulebook_path = Some(path);
    }
    if let Some(max_passes) = cli.max_passes {
        config.max_passes = max_passes;
    }

    // 로깅 초기화 (기본 warn, verbose 면 info)
    let default_filter = if config.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    // 규칙집 로드 실패는 세션 전체 중단
    let g2p = match G2p::from_config(config) {
        Ok(g2p) => g2p,
        Err(e) => {
            log::error!("변환기 초기화 실패: {}", e);
            eprintln!("kog2p: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let reader: Box<dyn BufRead> = match &cli.infile {
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                eprintln!("kog2p: {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Box::new(io::stdin().lock()),
    };

    let mut failed = false;
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("kog2p: 입력 읽기 실패: {}", e);
                return ExitCode::FAILURE;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if cli.words {
            let result = g2p.convert(line);
            println!(
                "{}\t{}",
                result.pronunciations.join(" "),
                result.phone_symbols.join(" ")
            );
            for failure in &result.failures {
                eprintln!("kog2p: {:?}: {}", failure.word, failure.error);
                failed = true;
            }
        } else {
            match g2p.convert_sentence(line) {
                Ok(result) => println!("{}\t{}", result.phones, result.graphemes),
                Err(e) => {
                    eprintln!("kog2p: {:?}: {}", line, e);
                    failed = true;
                }
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
