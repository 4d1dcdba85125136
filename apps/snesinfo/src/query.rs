//! `%{keyword}` output templates.

use snesinfo_core::RomHeader;

pub const DEFAULT_QUERY: &str = "name: %{name}; offset: %{offset}; checksum: %{checksum}";

pub const KEYWORDS: &[&str] = &[
    "%{filename}",
    "%{name}",
    "%{offset}",
    "%{layout}",
    "%{cart_type}",
    "%{rom_size}",
    "%{ram_size}",
    "%{country_code}",
    "%{licensee_code}",
    "%{version_number}",
    "%{checksum}",
    "%{checksum_complement}",
    "%{unknown1}",
    "%{extended}",
];

/// A template with the keywords it mentions resolved up front.
#[derive(Debug, Clone)]
pub struct Query {
    template: String,
    used: Vec<&'static str>,
}

impl Query {
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let used = KEYWORDS
            .iter()
            .copied()
            .filter(|keyword| template.contains(keyword))
            .collect();
        Self { template, used }
    }

    pub fn render(&self, header: &RomHeader) -> String {
        self.used
            .iter()
            .fold(self.template.clone(), |output, &keyword| {
                output.replace(keyword, &value(header, keyword))
            })
    }
}

fn value(header: &RomHeader, keyword: &str) -> String {
    match keyword {
        "%{filename}" => header.filename.clone(),
        "%{name}" => header.name.clone(),
        "%{offset}" => format!("{:#x}", header.offset),
        "%{layout}" => header.layout.bits().to_string(),
        "%{cart_type}" => header.cart_type.bits().to_string(),
        "%{rom_size}" => header.rom_size.to_string(),
        "%{ram_size}" => header.ram_size.to_string(),
        "%{country_code}" => header.region.code().to_string(),
        "%{licensee_code}" => header.licensee_code.to_string(),
        "%{version_number}" => header.version_number.to_string(),
        "%{checksum}" => header.checksum.to_string(),
        "%{checksum_complement}" => header.checksum_complement.to_string(),
        "%{unknown1}" => header.unknown1.to_string(),
        "%{extended}" => header.extended.clone().unwrap_or_default(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use snesinfo_core::{CartType, Layout, MappingMode, Region};

    use super::*;

    fn header() -> RomHeader {
        RomHeader {
            filename: "roms/quest.smc".to_owned(),
            offset: 0x8100,
            mapping: Some(MappingMode::LoRom),
            name: "QUEST".to_owned(),
            layout: Layout::LOROM | Layout::FAST,
            cart_type: CartType::ROM | CartType::RAM | CartType::BATTERY,
            rom_size: 1024,
            ram_size: 8,
            region: Region::Pal,
            destination_code: 0x02,
            licensee_code: 0x33,
            version_number: 1,
            checksum: 41178,
            checksum_complement: 24357,
            unknown1: 7,
            extended: None,
        }
    }

    #[test]
    fn default_query() {
        let query = Query::new(DEFAULT_QUERY);
        assert_eq!(
            query.render(&header()),
            "name: QUEST; offset: 0x8100; checksum: 41178"
        );
    }

    #[test]
    fn numeric_fields_are_decimal() {
        let query = Query::new("%{layout} %{cart_type} %{rom_size} %{ram_size} %{country_code}");
        assert_eq!(query.render(&header()), "5 7 1024 8 2");
    }

    #[test]
    fn repeated_keywords_are_all_replaced() {
        let query = Query::new("%{checksum}  %{filename} %{checksum}");
        assert_eq!(
            query.render(&header()),
            "41178  roms/quest.smc 41178"
        );
    }

    #[test]
    fn missing_extended_title_renders_empty() {
        let query = Query::new("[%{extended}]");
        assert_eq!(query.render(&header()), "[]");
    }

    #[test]
    fn unknown_keywords_are_left_alone() {
        let query = Query::new("%{bogus} %{version_number}");
        assert_eq!(query.render(&header()), "%{bogus} 1");
    }
}
