use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdFamily {
    Donor,
    Specimen,
    Sample,
    Mutation,
    File,
    Object,
    Analysis,
}

impl IdFamily {
    pub const ALL: [IdFamily; 7] = [
        IdFamily::Donor,
        IdFamily::Specimen,
        IdFamily::Sample,
        IdFamily::Mutation,
        IdFamily::File,
        IdFamily::Object,
        IdFamily::Analysis,
    ];

    /// Fixed prefix prepended to derived digests. Object and analysis ids are
    /// bare UUIDs. These values label issued data and must never change.
    pub fn prefix(self) -> &'static str {
        match self {
            IdFamily::Donor => "DO",
            IdFamily::Specimen => "SP",
            IdFamily::Sample => "SA",
            IdFamily::Mutation => "MU",
            IdFamily::File => "FI",
            IdFamily::Object | IdFamily::Analysis => "",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IdFamily::Donor => "donor",
            IdFamily::Specimen => "specimen",
            IdFamily::Sample => "sample",
            IdFamily::Mutation => "mutation",
            IdFamily::File => "file",
            IdFamily::Object => "object",
            IdFamily::Analysis => "analysis",
        }
    }
}

impl fmt::Display for IdFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IdFamily::ALL
            .into_iter()
            .find(|family| family.as_str() == s)
            .ok_or_else(|| format!("unknown id family: {s}"))
    }
}

/// An identifier handed back to a caller, with the family it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedId {
    pub family: IdFamily,
    pub id: String,
}

impl IssuedId {
    pub fn new(family: IdFamily, id: impl Into<String>) -> Self {
        IssuedId {
            family,
            id: id.into(),
        }
    }
}

/// Six-part natural key of a somatic mutation. Field order is the hash order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MutationKey {
    pub chromosome: String,
    pub chromosome_start: String,
    pub chromosome_end: String,
    pub mutation: String,
    pub mutation_type: String,
    pub assembly_version: String,
}

impl MutationKey {
    pub fn new(
        chromosome: impl Into<String>,
        chromosome_start: impl Into<String>,
        chromosome_end: impl Into<String>,
        mutation: impl Into<String>,
        mutation_type: impl Into<String>,
        assembly_version: impl Into<String>,
    ) -> Self {
        MutationKey {
            chromosome: chromosome.into(),
            chromosome_start: chromosome_start.into(),
            chromosome_end: chromosome_end.into(),
            mutation: mutation.into(),
            mutation_type: mutation_type.into(),
            assembly_version: assembly_version.into(),
        }
    }

    pub fn keys(&self) -> [&str; 6] {
        [
            self.chromosome.as_str(),
            self.chromosome_start.as_str(),
            self.chromosome_end.as_str(),
            self.mutation.as_str(),
            self.mutation_type.as_str(),
            self.assembly_version.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutation_keys_keep_field_order() {
        let key = MutationKey::new("1", "100", "200", "A>T", "SNP", "GRCh37");
        assert_eq!(key.keys(), ["1", "100", "200", "A>T", "SNP", "GRCh37"]);
    }

    #[test]
    fn prefixes_are_fixed() {
        assert_eq!(IdFamily::Donor.prefix(), "DO");
        assert_eq!(IdFamily::Specimen.prefix(), "SP");
        assert_eq!(IdFamily::Sample.prefix(), "SA");
        assert_eq!(IdFamily::Mutation.prefix(), "MU");
        assert_eq!(IdFamily::File.prefix(), "FI");
        assert_eq!(IdFamily::Object.prefix(), "");
        assert_eq!(IdFamily::Analysis.prefix(), "");
    }

    #[test]
    fn parses_every_family_name() {
        for family in IdFamily::ALL {
            assert_eq!(family.as_str().parse::<IdFamily>(), Ok(family));
        }
        assert!("patient".parse::<IdFamily>().is_err());
    }

    #[test]
    fn serializes_snake_case() {
        let issued = IssuedId::new(IdFamily::Specimen, "SPabc");
        let json = serde_json::to_value(&issued).unwrap();
        assert_eq!(json["family"], "specimen");
        assert_eq!(json["id"], "SPabc");
    }
}
