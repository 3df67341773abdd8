use anyhow::Context;

#[derive(serde::Deserialize)]
struct TokenSecret {
    id_token: String,
}

/// extract the jwt from the json document stored in the token secret
pub fn parse_token_secret(secret: &str) -> anyhow::Result<String> {
    let parsed: TokenSecret =
        serde_json::from_str(secret).context("token secret is not the expected json document")?;
    Ok(parsed.id_token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_reads_the_id_token() {
        let token = parse_token_secret(r#"{"id_token": "abc.def.ghi", "refresh": "x"}"#).unwrap();
        assert_eq!(token, "abc.def.ghi");
    }

    #[test]
    fn it_rejects_plain_strings() {
        assert!(parse_token_secret("abc.def.ghi").is_err());
    }
}
