//! Static contact details published next to the contact form.

use serde::Serialize;

pub const CONTACT_EMAIL: &str = "yogaseekhoinfo@gmail.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    pub id: &'static str,
    pub url: &'static str,
}

pub const SOCIAL_LINKS: [SocialLink; 3] = [
    SocialLink {
        id: "instagram",
        url: "https://www.instagram.com/yogawithakshay",
    },
    SocialLink {
        id: "facebook",
        url: "https://www.facebook.com/yogawithakshay1",
    },
    SocialLink {
        id: "youtube",
        url: "https://www.youtube.com/@yogawithakshay2736",
    },
];
