//! City extraction.
//!
//! Known cities are listed as lowercase word forms (nominative plus the common
//! inflections and abbreviations) mapped to one canonical display form. A
//! single word-boundary regex is compiled from the keys, longest first, so the
//! leftmost mention in the text wins and a longer form beats its own prefix at
//! the same position ("ростов-на-дону" before "ростов").

use phf::phf_map;
use regex::Regex;

static CITY_FORMS: phf::Map<&'static str, &'static str> = phf_map! {
    "москва" => "Москва",
    "москвы" => "Москва",
    "москве" => "Москва",
    "москву" => "Москва",
    "москвой" => "Москва",
    "мск" => "Москва",
    "санкт-петербург" => "Санкт-Петербург",
    "санкт-петербурга" => "Санкт-Петербург",
    "санкт-петербурге" => "Санкт-Петербург",
    "петербург" => "Санкт-Петербург",
    "петербурга" => "Санкт-Петербург",
    "петербурге" => "Санкт-Петербург",
    "питер" => "Санкт-Петербург",
    "питера" => "Санкт-Петербург",
    "питере" => "Санкт-Петербург",
    "спб" => "Санкт-Петербург",
    "минск" => "Минск",
    "минска" => "Минск",
    "минске" => "Минск",
    "екатеринбург" => "Екатеринбург",
    "екатеринбурга" => "Екатеринбург",
    "екатеринбурге" => "Екатеринбург",
    "екб" => "Екатеринбург",
    "новосибирск" => "Новосибирск",
    "новосибирска" => "Новосибирск",
    "новосибирске" => "Новосибирск",
    "казань" => "Казань",
    "казани" => "Казань",
    "самара" => "Самара",
    "самары" => "Самара",
    "самаре" => "Самара",
    "самару" => "Самара",
    "ростов" => "Ростов",
    "ростова" => "Ростов",
    "ростове" => "Ростов",
    "ростов-на-дону" => "Ростов",
    "ростове-на-дону" => "Ростов",
    "владивосток" => "Владивосток",
    "владивостока" => "Владивосток",
    "владивостоке" => "Владивосток",
    "челябинск" => "Челябинск",
    "челябинска" => "Челябинск",
    "челябинске" => "Челябинск",
    "нижний новгород" => "Нижний Новгород",
    "нижнего новгорода" => "Нижний Новгород",
    "нижнем новгороде" => "Нижний Новгород",
    "уфа" => "Уфа",
    "уфы" => "Уфа",
    "уфе" => "Уфа",
    "краснодар" => "Краснодар",
    "краснодара" => "Краснодар",
    "краснодаре" => "Краснодар",
};

#[derive(Debug, Clone)]
pub struct CityMatcher {
    pattern: Regex,
}

impl CityMatcher {
    pub fn new() -> Self {
        let mut forms: Vec<&str> = CITY_FORMS.keys().copied().collect();
        forms.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
        let alternation = forms
            .iter()
            .map(|form| regex::escape(form).replace(' ', r"\s+"))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))
            .expect("static city pattern must compile");
        Self { pattern }
    }

    /// Canonical form of the first known city mentioned in `text`.
    pub fn find(&self, text: &str) -> Option<&'static str> {
        let found = self.pattern.find(text)?;
        let form = found
            .as_str()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        CITY_FORMS.get(form.as_str()).copied()
    }

    /// Every canonical city the matcher knows, sorted and deduplicated.
    pub fn canonical_cities() -> Vec<&'static str> {
        let mut cities: Vec<&'static str> = CITY_FORMS.values().copied().collect();
        cities.sort_unstable();
        cities.dedup();
        cities
    }
}

impl Default for CityMatcher {
    fn default() -> Self {
        Self::new()
    }
}
