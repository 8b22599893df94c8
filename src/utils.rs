use anyhow::anyhow;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use sha2::{Digest, Sha256};

pub fn init_logging() -> Result<(), anyhow::Error> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}",
        )))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(
            Root::builder()
                .appender("stdout")
                .build(log::LevelFilter::Info),
        )
        .map_err(|e| anyhow!("Invalid logging config: {}", e))?;

    log4rs::init_config(config)?;

    Ok(())
}

/// Derives a short shareable referral code from a user id and a random salt.
pub fn referral_code(user_id: &str) -> String {
    let salt = uuid::Uuid::new_v4().hyphenated().to_string();
    let digest = Sha256::digest(format!("{user_id}:{salt}").as_bytes());

    let mut code = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        code.push_str(&format!("{:02X}", byte));
    }

    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn referral_codes_are_short_hex() {
        let code = referral_code("user-1");
        assert_eq!(code.len(), 8);
        assert!(code.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn referral_codes_are_salted() {
        assert_ne!(referral_code("user-1"), referral_code("user-1"));
    }
}
