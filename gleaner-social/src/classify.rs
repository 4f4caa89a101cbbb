//! Rule-based labels for a profile.
//!
//! Rules run in a fixed order and accumulate; a profile that matches none of
//! them is a [`Tag::StandardUser`].
use crate::profile::Profile;
use serde::{Serialize, Serializer};
use std::fmt;

/// Biography keywords that mark someone as a business contact.
pub const COMMERCIAL_KEYWORDS: &[&str] = &[
    "ceo",
    "founder",
    "fundador",
    "dueño",
    "marketing",
    "ventas",
    "manager",
    "gerente",
    "co-founder",
];

const MACRO_ABOVE: u64 = 100_000;
const MICRO_FROM: u64 = 5_000;
const NANO_FROM: u64 = 1_000;
const BOT_FOLLOWING_ABOVE: u64 = 1_500;
const BOT_FOLLOWERS_BELOW: u64 = 100;
const AUTHORITY_RATIO: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    CommercialLead,
    MacroInfluencer,
    MicroInfluencer,
    NanoInfluencer,
    PossibleBot,
    HighAuthority,
    StandardUser,
}

impl Tag {
    pub fn label(self) -> &'static str {
        match self {
            Tag::CommercialLead => "Commercial Lead",
            Tag::MacroInfluencer => "Macro-Influencer",
            Tag::MicroInfluencer => "Micro-Influencer",
            Tag::NanoInfluencer => "Nano-Influencer",
            Tag::PossibleBot => "Possible Bot/Spam",
            Tag::HighAuthority => "High Authority",
            Tag::StandardUser => "Standard User",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.label())
    }
}

/// Labels for `profile`. Pure: the existing `tags` field is ignored.
///
/// ```
/// use gleaner_social::{Profile, Tag, classify};
///
/// let p = Profile {
///     follower_count: 5_000,
///     following_count: 1,
///     ..Profile::default()
/// };
/// assert_eq!(classify(&p), vec![Tag::MicroInfluencer, Tag::HighAuthority]);
/// ```
pub fn classify(profile: &Profile) -> Vec<Tag> {
    let mut tags = Vec::new();
    let followers = profile.follower_count;
    let following = profile.following_count;

    let bio = profile.biography.to_lowercase();
    let has_link = profile
        .external_url
        .as_deref()
        .is_some_and(|u| !u.trim().is_empty());
    if has_link || COMMERCIAL_KEYWORDS.iter().any(|k| bio.contains(k)) {
        tags.push(Tag::CommercialLead);
    }

    if followers > MACRO_ABOVE {
        tags.push(Tag::MacroInfluencer);
    } else if followers >= MICRO_FROM {
        tags.push(Tag::MicroInfluencer);
    } else if followers >= NANO_FROM {
        tags.push(Tag::NanoInfluencer);
    }

    if following > BOT_FOLLOWING_ABOVE && followers < BOT_FOLLOWERS_BELOW {
        tags.push(Tag::PossibleBot);
    }

    if followers > 0 && following > 0 && followers as f64 / following as f64 > AUTHORITY_RATIO {
        tags.push(Tag::HighAuthority);
    }

    if tags.is_empty() {
        tags.push(Tag::StandardUser);
    }
    tags
}

/// Tags joined the way the CSV column shows them.
pub fn join_tags(tags: &[Tag]) -> String {
    tags.iter().map(|t| t.label()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(followers: u64, following: u64) -> Profile {
        Profile {
            follower_count: followers,
            following_count: following,
            ..Profile::default()
        }
    }

    #[test]
    fn micro_boundary_with_authority() {
        assert_eq!(
            classify(&profile(5_000, 1)),
            vec![Tag::MicroInfluencer, Tag::HighAuthority]
        );
    }

    #[test]
    fn influencer_bands() {
        assert_eq!(classify(&profile(100_001, 0)), vec![Tag::MacroInfluencer]);
        assert_eq!(classify(&profile(100_000, 0)), vec![Tag::MicroInfluencer]);
        assert_eq!(classify(&profile(4_999, 0)), vec![Tag::NanoInfluencer]);
        assert_eq!(classify(&profile(1_000, 0)), vec![Tag::NanoInfluencer]);
        assert_eq!(classify(&profile(999, 0)), vec![Tag::StandardUser]);
    }

    #[test]
    fn bot_heuristic() {
        assert_eq!(classify(&profile(99, 1_501)), vec![Tag::PossibleBot]);
        assert_eq!(classify(&profile(100, 1_501)), vec![Tag::StandardUser]);
        assert_eq!(classify(&profile(99, 1_500)), vec![Tag::StandardUser]);
    }

    #[test]
    fn authority_ratio_is_strict() {
        assert_eq!(classify(&profile(20, 10)), vec![Tag::StandardUser]);
        assert_eq!(classify(&profile(21, 10)), vec![Tag::HighAuthority]);
        assert_eq!(classify(&profile(0, 0)), vec![Tag::StandardUser]);
    }

    #[test]
    fn commercial_by_keyword_or_link() {
        let mut p = profile(0, 0);
        p.biography = "Dueño de @tienda | envíos".into();
        assert_eq!(classify(&p), vec![Tag::CommercialLead]);

        let mut p = profile(0, 0);
        p.biography = "CEO and FOUNDER".into();
        assert_eq!(classify(&p), vec![Tag::CommercialLead]);

        let mut p = profile(0, 0);
        p.external_url = Some("https://shop.example".into());
        assert_eq!(classify(&p), vec![Tag::CommercialLead]);

        let mut p = profile(0, 0);
        p.external_url = Some("".into());
        assert_eq!(classify(&p), vec![Tag::StandardUser]);
    }

    #[test]
    fn tags_accumulate_in_rule_order() {
        let mut p = profile(250_000, 300);
        p.biography = "marketing".into();
        let tags = classify(&p);
        assert_eq!(
            tags,
            vec![Tag::CommercialLead, Tag::MacroInfluencer, Tag::HighAuthority]
        );
        assert_eq!(
            join_tags(&tags),
            "Commercial Lead, Macro-Influencer, High Authority"
        );
        assert_eq!(classify(&p), tags);
    }
}
