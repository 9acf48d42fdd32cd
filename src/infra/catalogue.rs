//! Bundled dust yield catalogue.

use std::collections::HashSet;

use crate::domain::YieldRecord;
use crate::infra::source::{CatalogueError, YieldSource};
use crate::util::assets;

const CATALOGUE_PATH: &str = "poe-dust.json";

/// Reads `data/poe-dust.json` from the binary. The bundled file is a sample;
/// uniques it does not list end up in `ItemDataset::missing`.
#[derive(Clone, Debug, Default)]
pub struct EmbeddedCatalogue;

impl YieldSource for EmbeddedCatalogue {
    fn load_yields(&self) -> Result<Vec<YieldRecord>, CatalogueError> {
        let raw = assets::data_file(CATALOGUE_PATH)
            .ok_or_else(|| CatalogueError::Missing(CATALOGUE_PATH.to_string()))?;
        parse_catalogue(&raw)
    }
}

/// Strict parse: every record must carry finite, non-negative yields and a
/// unique name.
pub fn parse_catalogue(raw: &[u8]) -> Result<Vec<YieldRecord>, CatalogueError> {
    let records: Vec<YieldRecord> = serde_json::from_slice(raw)?;

    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        validate(record)?;
        if !seen.insert(record.name.as_str()) {
            return Err(CatalogueError::DuplicateName(record.name.clone()));
        }
    }

    tracing::debug!(count = records.len(), "loaded dust catalogue");
    Ok(records)
}

fn validate(record: &YieldRecord) -> Result<(), CatalogueError> {
    let fields = [
        ("dustVal", record.dust_base),
        ("dustValIlvl84", record.dust_ilvl84),
        ("dustValIlvl84Q20", record.dust_ilvl84_q20),
        ("dustPerSlot", record.dust_per_slot),
    ];

    match fields
        .into_iter()
        .find(|&(_, value)| !value.is_finite() || value < 0.0)
    {
        Some((field, _)) => Err(CatalogueError::InvalidValue {
            name: record.name.clone(),
            field,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, dust: &str) -> String {
        format!(
            r#"{{"name":"{name}","baseType":"Leather Belt","dustVal":{dust},"dustValIlvl84":10,"dustValIlvl84Q20":12,"dustPerSlot":3,"w":2,"h":1,"slots":2,"link":"https://www.poewiki.net/wiki/{name}"}}"#
        )
    }

    #[test]
    fn bundled_catalogue_is_valid() {
        let records = EmbeddedCatalogue.load_yields().expect("catalogue parses");
        assert!(records.len() > 10);
        assert!(records.iter().any(|record| record.name == "Headhunter"));
    }

    #[test]
    fn accepts_well_formed_records() {
        let raw = format!("[{},{}]", entry("Headhunter", "5"), entry("Mageblood", "7"));
        let records = parse_catalogue(raw.as_bytes()).expect("valid");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].dust_base, 7.0);
    }

    #[test]
    fn rejects_negative_yield() {
        let raw = format!("[{}]", entry("Headhunter", "-5"));
        match parse_catalogue(raw.as_bytes()) {
            Err(CatalogueError::InvalidValue { name, field }) => {
                assert_eq!(name, "Headhunter");
                assert_eq!(field, "dustVal");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicate_names() {
        let raw = format!("[{},{}]", entry("Headhunter", "5"), entry("Headhunter", "6"));
        assert!(matches!(
            parse_catalogue(raw.as_bytes()),
            Err(CatalogueError::DuplicateName(name)) if name == "Headhunter"
        ));
    }

    #[test]
    fn rejects_missing_fields() {
        let raw = br#"[{"name":"Headhunter","baseType":"Leather Belt"}]"#;
        assert!(matches!(
            parse_catalogue(raw),
            Err(CatalogueError::Parse(_))
        ));
    }
}
