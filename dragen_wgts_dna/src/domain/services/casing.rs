//! Key case conversion between the event schemas (camelCase) and the
//! workflow language inputs (snake_case)

use serde_json::{Map, Value};

/// `tumor_hrd_score` -> `tumorHrdScore`
pub fn snake_to_camel(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, word) in s.split('_').filter(|w| !w.is_empty()).enumerate() {
        if i == 0 {
            out.push_str(word);
            continue;
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// `read1FileUri` -> `read1_file_uri`. Every uppercase character starts a new
/// word, so acronyms split per letter, and leading underscores are dropped.
pub fn camel_to_snake(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if c.is_uppercase() {
            out.push('_');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out.trim_start_matches('_').to_string()
}

/// Rewrite every object key in `value`, at any depth, to snake_case.
/// Values, including strings, are left alone.
pub fn snake_case_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (camel_to_snake(&k), snake_case_keys(v)))
                .collect::<Map<_, _>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(snake_case_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn it_camel_cases() {
        assert_eq!(snake_to_camel("tumor_hrd_score"), "tumorHrdScore");
        assert_eq!(
            snake_to_camel("avg_autosomal_coverage_over_genome"),
            "avgAutosomalCoverageOverGenome"
        );
        assert_eq!(snake_to_camel("contamination_rate"), "contaminationRate");
        assert_eq!(snake_to_camel("single"), "single");
    }

    #[test]
    fn it_snake_cases() {
        assert_eq!(camel_to_snake("read1FileUri"), "read1_file_uri");
        assert_eq!(camel_to_snake("sampleName"), "sample_name");
        assert_eq!(camel_to_snake("MSI"), "m_s_i");
        assert_eq!(camel_to_snake("already_snake"), "already_snake");
    }

    #[test]
    fn it_snake_cases_nested_keys_only() {
        let inputs = json!({
            "sampleName": "L2301197",
            "sequenceData": {
                "fastqListRows": [
                    {"rgLb": "L2301197", "read_1": {"class": "File", "location": "s3://b/camelCase.fq"}}
                ]
            },
            "somaticMsiOptions": {"msiMicrosatellitesFile": "keepMe"}
        });

        assert_eq!(
            snake_case_keys(inputs),
            json!({
                "sample_name": "L2301197",
                "sequence_data": {
                    "fastq_list_rows": [
                        {"rg_lb": "L2301197", "read_1": {"class": "File", "location": "s3://b/camelCase.fq"}}
                    ]
                },
                "somatic_msi_options": {"msi_microsatellites_file": "keepMe"}
            })
        );
    }
}
