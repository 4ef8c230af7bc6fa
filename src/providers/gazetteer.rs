//! Static fallback gazetteer for Cali, used when no live place-search
//! backend is reachable.
//!
//! Matching cascade: category keyword contained in the query, then query
//! contained in a place name, then any query word appearing in a name.

use crate::Error;
use crate::model::{GeoPoint, Place};
use crate::providers::PlaceSearch;

pub struct StaticGazetteer {
    entries: Vec<Entry>,
}

struct Entry {
    keyword: &'static str,
    place: Place,
}

fn place(name: &str, lat: f64, lng: f64, category: &str, address: &str) -> Place {
    Place {
        name: name.to_string(),
        location: GeoPoint { lat, lng },
        category: category.to_string(),
        address: address.to_string(),
    }
}

impl Default for StaticGazetteer {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticGazetteer {
    pub fn new() -> Self {
        let table: &[(&'static str, Place)] = &[
            ("hospital", place("Hospital Universitario del Valle", 3.3759, -76.5325, "hospital", "Calle 5 # 36-08")),
            ("hospital", place("Clínica Imbanaco", 3.4205, -76.5462, "hospital", "Cra. 38 # 5A-100")),
            ("hospital", place("Fundación Valle del Lili", 3.3686, -76.5307, "hospital", "Cra. 98 # 18-49")),
            ("hospital", place("Hospital San Juan de Dios", 3.4512, -76.5401, "hospital", "Cra. 10 # 1-27")),
            ("universidad", place("Universidad del Valle", 3.3759, -76.5325, "university", "Ciudad Universitaria Meléndez")),
            ("universidad", place("Universidad Santiago de Cali", 3.4412, -76.5456, "university", "Calle 5 # 62-00")),
            ("universidad", place("Universidad Icesi", 3.3409, -76.5301, "university", "Cra. 122 # 1-80")),
            ("universidad", place("Universidad Autónoma de Occidente", 3.4376, -76.5465, "university", "Cra. 122 # 1-80")),
            ("centro comercial", place("Centro Comercial Jardín Plaza", 3.3689, -76.5297, "mall", "Cra. 100 # 5-169")),
            ("centro comercial", place("Centro Comercial Único", 3.4203, -76.5468, "mall", "Cra. 38 # 5-01")),
            ("centro comercial", place("Centro Comercial Chipichape", 3.4926, -76.5008, "mall", "Cra. 38 # 53-45")),
            ("parque", place("Parque del Perro", 3.4025, -76.5456, "park", "Calle 2 Oeste")),
            ("parque", place("Parque del Gato", 3.4518, -76.5321, "park", "Cra. 4 # 10-00")),
            ("parque", place("Parque de la Caña", 3.4852, -76.5051, "park", "Cra. 56 # 3-00")),
            ("aeropuerto", place("Aeropuerto Alfonso Bonilla Aragón", 3.5432, -76.3815, "airport", "Palmira, Valle del Cauca")),
            ("farmacia", place("Farmacia Cruz Verde", 3.4510, -76.5320, "pharmacy", "Cra. 4 # 10-25")),
            ("farmacia", place("Farmacia Dr. Simi", 3.4415, -76.5460, "pharmacy", "Calle 5 # 62-15")),
            ("banco", place("Banco de Bogotá", 3.4515, -76.5318, "bank", "Cra. 4 # 10-30")),
            ("banco", place("Bancolombia", 3.4418, -76.5458, "bank", "Calle 5 # 62-20")),
        ];

        Self {
            entries: table
                .iter()
                .map(|(keyword, place)| Entry {
                    keyword,
                    place: place.clone(),
                })
                .collect(),
        }
    }
}

impl PlaceSearch for StaticGazetteer {
    fn search(&self, query: &str, _area: &str, limit: usize) -> Result<Vec<Place>, Error> {
        let query = query.to_lowercase();

        // Category lookup first
        let mut matches: Vec<Place> = self
            .entries
            .iter()
            .filter(|entry| query.contains(entry.keyword))
            .map(|entry| entry.place.clone())
            .collect();

        // Then whole-query name containment
        if matches.is_empty() {
            matches = self
                .entries
                .iter()
                .filter(|entry| entry.place.name.to_lowercase().contains(&query))
                .map(|entry| entry.place.clone())
                .collect();
        }

        // Finally any single query word
        if matches.is_empty() {
            matches = self
                .entries
                .iter()
                .filter(|entry| {
                    let name = entry.place.name.to_lowercase();
                    query.split_whitespace().any(|word| name.contains(word))
                })
                .map(|entry| entry.place.clone())
                .collect();
        }

        matches.truncate(limit);
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_keyword_returns_all_places_of_the_category() {
        let gazetteer = StaticGazetteer::new();
        let matches = gazetteer.search("hospital cercano", "Cali, Colombia", 5).unwrap();
        assert_eq!(matches.len(), 4);
        assert!(matches.iter().all(|p| p.category == "hospital"));
    }

    #[test]
    fn two_pharmacies_are_listed() {
        let gazetteer = StaticGazetteer::new();
        let matches = gazetteer.search("farmacia", "Cali, Colombia", 5).unwrap();
        let names: Vec<&str> = matches.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Farmacia Cruz Verde", "Farmacia Dr. Simi"]);
    }

    #[test]
    fn falls_back_to_name_containment() {
        let gazetteer = StaticGazetteer::new();
        let matches = gazetteer.search("imbanaco", "Cali, Colombia", 5).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Clínica Imbanaco");
    }

    #[test]
    fn word_level_match_finds_partial_names() {
        let gazetteer = StaticGazetteer::new();
        let matches = gazetteer
            .search("sede santiago", "Cali, Colombia", 5)
            .unwrap();
        assert!(matches.iter().any(|p| p.name == "Universidad Santiago de Cali"));
    }

    #[test]
    fn unknown_queries_return_empty() {
        let gazetteer = StaticGazetteer::new();
        assert!(gazetteer.search("xyzzy", "Cali, Colombia", 5).unwrap().is_empty());
    }

    #[test]
    fn limit_caps_the_result_list() {
        let gazetteer = StaticGazetteer::new();
        let matches = gazetteer.search("universidad", "Cali, Colombia", 2).unwrap();
        assert_eq!(matches.len(), 2);
    }
}
