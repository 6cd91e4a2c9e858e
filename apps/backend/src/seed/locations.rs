//! Built-in Region III municipality list.
//!
//! Used when no region dataset file is available. Slugs are fixed here rather
//! than derived so they stay stable for names with diacritics.

/// (province name, [(municipality name, slug)])
pub const BUILTIN_MUNICIPALITIES: [(&str, &[(&str, &str)]); 7] = [
    (
        "Aurora",
        &[
            ("Baler", "baler"),
            ("Casiguran", "casiguran"),
            ("Dilasag", "dilasag"),
            ("Dinalungan", "dinalungan"),
            ("Dingalan", "dingalan"),
            ("Dipaculao", "dipaculao"),
            ("Maria Aurora", "maria-aurora"),
            ("San Luis", "san-luis"),
        ],
    ),
    (
        "Bataan",
        &[
            ("Abucay", "abucay"),
            ("Bagac", "bagac"),
            ("City of Balanga", "city-of-balanga"),
            ("Dinalupihan", "dinalupihan"),
            ("Hermosa", "hermosa"),
            ("Limay", "limay"),
            ("Mariveles", "mariveles"),
            ("Morong", "morong"),
            ("Orani", "orani"),
            ("Orion", "orion"),
            ("Pilar", "pilar"),
            ("Samal", "samal"),
        ],
    ),
    (
        "Bulacan",
        &[
            ("Angat", "angat"),
            ("Balagtas", "balagtas"),
            ("City of Baliwag", "city-of-baliwag"),
            ("Bocaue", "bocaue"),
            ("Bulacan", "bulacan"),
            ("Bustos", "bustos"),
            ("Calumpit", "calumpit"),
            ("Guiguinto", "guiguinto"),
            ("Hagonoy", "hagonoy"),
            ("City of Malolos", "city-of-malolos"),
            ("Marilao", "marilao"),
            ("City of Meycauayan", "city-of-meycauayan"),
            ("Norzagaray", "norzagaray"),
            ("Obando", "obando"),
            ("Pandi", "pandi"),
            ("Paombong", "paombong"),
            ("Plaridel", "plaridel"),
            ("Pulilan", "pulilan"),
            ("San Ildefonso", "san-ildefonso"),
            ("City of San Jose Del Monte", "city-of-san-jose-del-monte"),
            ("San Miguel", "san-miguel"),
            ("San Rafael", "san-rafael"),
            ("Santa Maria", "santa-maria"),
            ("Doña Remedios Trinidad", "dona-remedios-trinidad"),
        ],
    ),
    (
        "Nueva Ecija",
        &[
            ("Aliaga", "aliaga"),
            ("Bongabon", "bongabon"),
            ("City of Cabanatuan", "city-of-cabanatuan"),
            ("Cabiao", "cabiao"),
            ("Carranglan", "carranglan"),
            ("Cuyapo", "cuyapo"),
            ("Gabaldon", "gabaldon"),
            ("City of Gapan", "city-of-gapan"),
            ("General Mamerto Natividad", "general-mamerto-natividad"),
            ("General Tinio", "general-tinio"),
            ("Guimba", "guimba"),
            ("Jaen", "jaen"),
            ("Laur", "laur"),
            ("Licab", "licab"),
            ("Llanera", "llanera"),
            ("Lupao", "lupao"),
            ("Science City of Muñoz", "science-city-of-munoz"),
            ("Nampicuan", "nampicuan"),
            ("City of Palayan", "city-of-palayan"),
            ("Pantabangan", "pantabangan"),
            ("Peñaranda", "penaranda"),
            ("Quezon", "quezon"),
            ("Rizal", "rizal"),
            ("San Antonio", "san-antonio"),
            ("San Isidro", "san-isidro"),
            ("San Jose City", "san-jose-city"),
            ("San Leonardo", "san-leonardo"),
            ("Santa Rosa", "santa-rosa"),
            ("Santo Domingo", "santo-domingo"),
            ("Talavera", "talavera"),
            ("Talugtug", "talugtug"),
            ("Zaragoza", "zaragoza"),
        ],
    ),
    (
        "Pampanga",
        &[
            ("Apalit", "apalit"),
            ("Arayat", "arayat"),
            ("Bacolor", "bacolor"),
            ("Candaba", "candaba"),
            ("Floridablanca", "floridablanca"),
            ("Guagua", "guagua"),
            ("Lubao", "lubao"),
            ("Mabalacat City", "mabalacat-city"),
            ("Macabebe", "macabebe"),
            ("Magalang", "magalang"),
            ("Masantol", "masantol"),
            ("Mexico", "mexico"),
            ("Minalin", "minalin"),
            ("Porac", "porac"),
            ("City of San Fernando", "city-of-san-fernando"),
            ("San Luis", "san-luis"),
            ("San Simon", "san-simon"),
            ("Santa Ana", "santa-ana"),
            ("Santa Rita", "santa-rita"),
            ("Sto. Tomas", "sto-tomas"),
            ("Sasmuan", "sasmuan"),
            ("City of Angeles", "city-of-angeles"),
        ],
    ),
    (
        "Tarlac",
        &[
            ("Anao", "anao"),
            ("Bamban", "bamban"),
            ("Camiling", "camiling"),
            ("Capas", "capas"),
            ("Concepcion", "concepcion"),
            ("Gerona", "gerona"),
            ("La Paz", "la-paz"),
            ("Mayantoc", "mayantoc"),
            ("Moncada", "moncada"),
            ("Paniqui", "paniqui"),
            ("Pura", "pura"),
            ("Ramos", "ramos"),
            ("San Clemente", "san-clemente"),
            ("San Manuel", "san-manuel"),
            ("Santa Ignacia", "santa-ignacia"),
            ("City of Tarlac", "city-of-tarlac"),
            ("Victoria", "victoria"),
            ("San Jose", "san-jose"),
        ],
    ),
    (
        "Zambales",
        &[
            ("Botolan", "botolan"),
            ("Cabangan", "cabangan"),
            ("Candelaria", "candelaria"),
            ("Castillejos", "castillejos"),
            ("Iba", "iba"),
            ("Masinloc", "masinloc"),
            ("Palauig", "palauig"),
            ("San Antonio", "san-antonio"),
            ("San Felipe", "san-felipe"),
            ("San Marcelino", "san-marcelino"),
            ("San Narciso", "san-narciso"),
            ("Santa Cruz", "santa-cruz"),
            ("Subic", "subic"),
            ("City of Olongapo", "city-of-olongapo"),
        ],
    ),
];

/// Number of municipalities in the built-in list.
pub fn builtin_municipality_count() -> usize {
    BUILTIN_MUNICIPALITIES.iter().map(|(_, list)| list.len()).sum()
}

#[cfg(test)]
mod tests {
    use region_data::REGION3_PROVINCES;

    use super::*;

    #[test]
    fn covers_every_region_province_in_order() {
        let names: Vec<&str> = BUILTIN_MUNICIPALITIES.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, REGION3_PROVINCES);
    }

    #[test]
    fn slugs_are_unique_within_a_province() {
        for (province, list) in BUILTIN_MUNICIPALITIES {
            let mut slugs: Vec<&str> = list.iter().map(|(_, slug)| *slug).collect();
            slugs.sort_unstable();
            slugs.dedup();
            assert_eq!(slugs.len(), list.len(), "duplicate slug in {province}");
        }
    }

    #[test]
    fn total_count() {
        assert_eq!(builtin_municipality_count(), 130);
    }
}
