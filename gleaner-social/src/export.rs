use crate::classify::join_tags;
use crate::error::SocialError;
use crate::profile::Profile;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// `<target>_followers_analysis.csv`
pub fn default_output_path(target: &str) -> PathBuf {
    PathBuf::from(format!("{target}_followers_analysis.csv"))
}

/// One CSV line; field order is the column order.
#[derive(Debug, Serialize)]
pub struct ProfileRow<'a> {
    pub username: &'a str,
    pub full_name: &'a str,
    pub biography: &'a str,
    pub tags: String,
    pub follower_count: u64,
    pub following_count: u64,
    pub category: &'a str,
    pub external_url: &'a str,
    pub is_private: bool,
    pub is_verified: bool,
    pub id: &'a str,
}

impl<'a> From<&'a Profile> for ProfileRow<'a> {
    fn from(p: &'a Profile) -> Self {
        Self {
            username: &p.username,
            full_name: &p.full_name,
            biography: &p.biography,
            tags: join_tags(&p.tags),
            follower_count: p.follower_count,
            following_count: p.following_count,
            category: &p.category,
            external_url: p.external_url.as_deref().unwrap_or_default(),
            is_private: p.is_private,
            is_verified: p.is_verified,
            id: &p.id,
        }
    }
}

/// Write `profiles` with a header row. An empty slice still produces the
/// header so downstream tools see the schema.
pub fn write_profiles_csv(path: &Path, profiles: &[Profile]) -> Result<(), SocialError> {
    let csv_err = |source| SocialError::Export {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    if profiles.is_empty() {
        writer.write_record(COLUMNS).map_err(csv_err)?;
    }
    for profile in profiles {
        writer
            .serialize(ProfileRow::from(profile))
            .map_err(csv_err)?;
    }
    writer
        .flush()
        .map_err(|e| csv_err(csv::Error::from(e)))?;
    tracing::info!(
        target: "social.export",
        path = %path.display(),
        rows = profiles.len(),
        "profiles written"
    );
    Ok(())
}

pub const COLUMNS: [&str; 11] = [
    "username",
    "full_name",
    "biography",
    "tags",
    "follower_count",
    "following_count",
    "category",
    "external_url",
    "is_private",
    "is_verified",
    "id",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Tag;

    #[test]
    fn output_name_follows_target() {
        assert_eq!(
            default_output_path("nasa"),
            PathBuf::from("nasa_followers_analysis.csv")
        );
    }

    #[test]
    fn rows_follow_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let profile = Profile {
            id: "7".into(),
            username: "alice".into(),
            full_name: "Alice, A".into(),
            biography: "founder".into(),
            external_url: None,
            follower_count: 5_000,
            following_count: 1,
            is_private: false,
            is_verified: true,
            category: "N/A".into(),
            tags: vec![Tag::CommercialLead, Tag::MicroInfluencer],
        };
        write_profiles_csv(&path, &[profile]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), COLUMNS.join(","));
        assert_eq!(
            lines.next().unwrap(),
            "alice,\"Alice, A\",founder,\"Commercial Lead, Micro-Influencer\",5000,1,N/A,,false,true,7"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn empty_export_keeps_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        write_profiles_csv(&path, &[]).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            format!("{}\n", COLUMNS.join(","))
        );
    }

    #[test]
    fn unwritable_path_is_an_export_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let err = write_profiles_csv(&path, &[]).unwrap_err();
        assert!(matches!(err, SocialError::Export { .. }));
    }
}
