//! Display transforms applied to request values before they are written.

use chrono::{NaiveDate, NaiveDateTime};

const INPUT_DATE: &str = "%Y-%m-%d";
const CONTRACT_DATE: &str = "%Y.%m.%d";

/// `2025-01-01` becomes `2025.01.01`. Anything else is returned unchanged.
pub fn format_contract_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw.trim(), INPUT_DATE) {
        Ok(date) => date.format(CONTRACT_DATE).to_string(),
        Err(_) => raw.to_string(),
    }
}

/// The date written when a request carries none.
pub fn contract_date_for(now: NaiveDateTime) -> String {
    now.format(CONTRACT_DATE).to_string()
}

/// Prefix a recognised shipment code with its Chinese label, keeping the
/// caller's spelling: `"Sea"` becomes `"海运 Sea"`.
pub fn shipment_mode_label(mode: &str) -> String {
    let label = match mode.trim().to_ascii_uppercase().as_str() {
        "SEA" => "海运",
        "LAND" => "陆运",
        "AIR" => "空运",
        _ => return mode.to_string(),
    };
    format!("{label} {}", mode.trim())
}

/// Keep the first occurrence of each whitespace-separated word.
pub fn dedupe_route_words(route: &str) -> String {
    let mut seen = Vec::new();
    for word in route.split_whitespace() {
        if !seen.contains(&word) {
            seen.push(word);
        }
    }
    seen.join(" ")
}

/// Characters allowed in a generated filename stem.
pub fn sanitize_filename_stem(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_dates() {
        assert_eq!(format_contract_date("2025-01-01"), "2025.01.01");
        assert_eq!(format_contract_date(" 2024-12-31 "), "2024.12.31");
        assert_eq!(format_contract_date("2025/01/01"), "2025/01/01");
        assert_eq!(format_contract_date("2025-02-30"), "2025-02-30");
        assert_eq!(format_contract_date("next week"), "next week");

        let now = NaiveDate::from_ymd_opt(2025, 3, 7)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(contract_date_for(now), "2025.03.07");
    }

    #[test]
    fn shipment_labels() {
        assert_eq!(shipment_mode_label("SEA"), "海运 SEA");
        assert_eq!(shipment_mode_label("LAND"), "陆运 LAND");
        assert_eq!(shipment_mode_label("AIR"), "空运 AIR");
        assert_eq!(shipment_mode_label("Sea"), "海运 Sea");
        assert_eq!(shipment_mode_label("RAIL"), "RAIL");
        assert_eq!(shipment_mode_label("海运 SEA"), "海运 SEA");
    }

    #[test]
    fn route_words_deduped_in_order() {
        assert_eq!(
            dedupe_route_words("Shanghai  to Almaty to Almaty 交车 Delivery 交车"),
            "Shanghai to Almaty 交车 Delivery"
        );
        assert_eq!(dedupe_route_words("   "), "");
    }

    #[test]
    fn filename_stems() {
        assert_eq!(sanitize_filename_stem("CT/2025 001"), "CT2025001");
        assert_eq!(sanitize_filename_stem("合同-01_a"), "合同-01_a");
        assert_eq!(sanitize_filename_stem("../.."), "");
    }
}
