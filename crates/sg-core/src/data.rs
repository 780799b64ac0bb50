//! Built-in lookup tables
//!
//! These are compiled into the binary and turned into a [`Registry`] once
//! per process by [`Registry::builtin`].
//!
//! [`Registry`]: crate::registry::Registry
//! [`Registry::builtin`]: crate::registry::Registry::builtin

use crate::types::Category;

/// Static form of [`PlatformPattern`](crate::types::PlatformPattern).
pub struct PlatformDef {
    pub domain: &'static str,
    pub profile: &'static [&'static str],
    pub exclude: &'static [&'static str],
    pub category: Category,
}

/// Static form of [`IndieEntry`](crate::registry::IndieEntry).
pub struct IndieDef {
    pub domain: &'static str,
    pub score_modifier: f64,
    pub reason: &'static str,
}

const fn platform(
    domain: &'static str,
    profile: &'static [&'static str],
    exclude: &'static [&'static str],
    category: Category,
) -> PlatformDef {
    PlatformDef {
        domain,
        profile,
        exclude,
        category,
    }
}

const fn indie(domain: &'static str, score_modifier: f64, reason: &'static str) -> IndieDef {
    IndieDef {
        domain,
        score_modifier,
        reason,
    }
}

const NONE: &[&str] = &[];
const MASTODON: &[&str] = &["/@*"];

// =============================================================================
// Platforms
// =============================================================================

const GITHUB_EXCLUDE: &[&str] = &[
    "/", "/features", "/pricing", "/about", "/explore", "/topics", "/trending",
    "/collections", "/marketplace", "/sponsors", "/enterprise", "/team", "/security",
    "/customer-stories", "/readme", "/login", "/join", "/signup", "/settings",
    "/notifications", "/search", "/orgs", "/organizations", "/site", "/contact",
    "/new", "/pulls", "/issues", "/codespaces", "/solutions", "/resources", "/events",
    "/apps",
];

const TWITTER_EXCLUDE: &[&str] = &[
    "/", "/home", "/explore", "/search", "/settings", "/i", "/login", "/signup", "/tos",
    "/privacy", "/notifications", "/messages", "/compose", "/hashtag",
];

pub const PLATFORMS: &[PlatformDef] = &[
    // Social media
    platform("twitter.com", &["/*"], TWITTER_EXCLUDE, Category::SocialMedia),
    platform("x.com", &["/*"], TWITTER_EXCLUDE, Category::SocialMedia),
    platform(
        "facebook.com",
        &["/*"],
        &[
            "/", "/login", "/help", "/policies", "/privacy", "/groups", "/watch",
            "/marketplace", "/gaming", "/events", "/business", "/legal", "/settings",
        ],
        Category::SocialMedia,
    ),
    platform(
        "instagram.com",
        &["/*"],
        &["/", "/explore", "/accounts", "/about", "/legal", "/direct", "/developer"],
        Category::SocialMedia,
    ),
    platform(
        "linkedin.com",
        &["/in/*", "/company/*", "/pub/*", "/school/*"],
        NONE,
        Category::SocialMedia,
    ),
    platform("tiktok.com", &["/@*"], NONE, Category::SocialMedia),
    platform("threads.net", &["/@*"], NONE, Category::SocialMedia),
    platform(
        "pinterest.com",
        &["/*"],
        &["/", "/search", "/ideas", "/today", "/business", "/login", "/about", "/_"],
        Category::SocialMedia,
    ),
    platform("snapchat.com", &["/add/*", "/@*"], NONE, Category::SocialMedia),
    platform("bsky.app", &["/profile/*"], NONE, Category::SocialMedia),
    platform(
        "vk.com",
        &["/*"],
        &["/", "/feed", "/search", "/login", "/about", "/support", "/terms"],
        Category::SocialMedia,
    ),
    platform(
        "tumblr.com",
        &["/*"],
        &[
            "/", "/explore", "/tagged", "/search", "/login", "/register", "/dashboard",
            "/settings", "/policy", "/help", "/about",
        ],
        Category::SocialMedia,
    ),
    platform("t.me", &["/*"], &["/", "/s"], Category::SocialMedia),
    // Development
    platform("github.com", &["/*"], GITHUB_EXCLUDE, Category::Development),
    platform(
        "gitlab.com",
        &["/*"],
        &["/", "/explore", "/users/sign_in", "/users/sign_up", "/help", "/dashboard", "/search", "/-"],
        Category::Development,
    ),
    platform(
        "bitbucket.org",
        &["/*"],
        &["/", "/product", "/account", "/dashboard", "/repo"],
        Category::Development,
    ),
    platform(
        "codeberg.org",
        &["/*"],
        &["/", "/explore", "/user/login", "/user/sign_up", "/repo"],
        Category::Development,
    ),
    platform(
        "codepen.io",
        &["/*"],
        &[
            "/", "/pen", "/trending", "/search", "/challenges", "/spark", "/features",
            "/login", "/signup", "/pricing", "/topics",
        ],
        Category::Development,
    ),
    platform("npmjs.com", &["/~*", "/org/*"], NONE, Category::Development),
    platform("pypi.org", &["/user/*"], NONE, Category::Development),
    platform("crates.io", &["/users/*"], NONE, Category::Development),
    platform("replit.com", &["/@*"], NONE, Category::Development),
    platform(
        "huggingface.co",
        &["/*"],
        &[
            "/", "/models", "/datasets", "/spaces", "/docs", "/pricing", "/login", "/join",
            "/blog", "/papers", "/learn", "/enterprise", "/tasks",
        ],
        Category::Development,
    ),
    platform("sourceforge.net", &["/u/*", "/projects/*"], NONE, Category::Development),
    // Federated
    platform("mastodon.social", MASTODON, NONE, Category::Federated),
    platform("mastodon.online", MASTODON, NONE, Category::Federated),
    platform("mstdn.social", MASTODON, NONE, Category::Federated),
    platform("fosstodon.org", MASTODON, NONE, Category::Federated),
    platform("hachyderm.io", MASTODON, NONE, Category::Federated),
    platform("infosec.exchange", MASTODON, NONE, Category::Federated),
    platform("mas.to", MASTODON, NONE, Category::Federated),
    platform(
        "pixelfed.social",
        &["/*"],
        &["/", "/i", "/site", "/discover", "/login", "/register", "/settings"],
        Category::Federated,
    ),
    platform("lemmy.world", &["/u/*", "/c/*"], NONE, Category::Federated),
    platform("misskey.io", MASTODON, NONE, Category::Federated),
    // Content
    platform("medium.com", &["/@*"], NONE, Category::Content),
    platform("substack.com", &["/@*", "/profile/*"], NONE, Category::Content),
    platform("wordpress.com", &["/read/blogs/*"], NONE, Category::Content),
    platform("blogger.com", &["/profile/*"], NONE, Category::Content),
    platform(
        "dev.to",
        &["/*"],
        &[
            "/", "/search", "/top", "/latest", "/t", "/enter", "/about", "/faq", "/privacy",
            "/terms", "/code-of-conduct", "/settings", "/dashboard", "/new", "/listings",
            "/videos", "/podcasts",
        ],
        Category::Content,
    ),
    platform("hashnode.com", &["/@*"], NONE, Category::Content),
    platform(
        "notion.so",
        &["*.notion.site", "/*"],
        &[
            "/product", "/pricing", "/templates", "/help", "/login", "/signup", "/enterprise",
            "/about", "/careers", "/blog", "/desktop", "/mobile", "/integrations", "/customers",
        ],
        Category::Content,
    ),
    // Creative
    platform(
        "behance.net",
        &["/*"],
        &[
            "/", "/search", "/galleries", "/joblist", "/hire", "/assets", "/live", "/about",
            "/login", "/signup", "/onboarding",
        ],
        Category::Creative,
    ),
    platform(
        "dribbble.com",
        &["/*"],
        &[
            "/", "/shots", "/jobs", "/search", "/designers", "/learn", "/pro", "/session",
            "/signup", "/tags", "/stories", "/hiring", "/about", "/marketplace",
        ],
        Category::Creative,
    ),
    platform(
        "deviantart.com",
        &["*.deviantart.com", "/*"],
        &[
            "/tag", "/search", "/topic", "/daily-deviations", "/join", "/users/login",
            "/about", "/core-membership", "/shop", "/watch", "/popular",
        ],
        Category::Creative,
    ),
    platform(
        "artstation.com",
        &["/*"],
        &[
            "/", "/artwork", "/search", "/channels", "/jobs", "/learning", "/marketplace",
            "/prints", "/blogs", "/contests", "/about", "/sign_in", "/sign_up", "/pro",
        ],
        Category::Creative,
    ),
    platform("flickr.com", &["/photos/*", "/people/*"], NONE, Category::Creative),
    platform(
        "soundcloud.com",
        &["/*"],
        &[
            "/", "/discover", "/search", "/upload", "/stream", "/charts", "/pages", "/you",
            "/settings", "/signin", "/terms-of-use", "/pro", "/messages", "/notifications",
        ],
        Category::Creative,
    ),
    platform(
        "bandcamp.com",
        &["*.bandcamp.com", "/*"],
        &[
            "/discover", "/about", "/help", "/signup", "/login", "/terms_of_use", "/privacy",
            "/tag", "/search", "/artists",
        ],
        Category::Creative,
    ),
    platform("unsplash.com", &["/@*"], NONE, Category::Creative),
    // Streaming
    platform(
        "youtube.com",
        &["/@*", "/channel/*", "/c/*", "/user/*"],
        NONE,
        Category::Streaming,
    ),
    platform(
        "twitch.tv",
        &["/*"],
        &[
            "/", "/directory", "/search", "/downloads", "/p", "/settings", "/subscriptions",
            "/inventory", "/wallet", "/drops", "/turbo", "/jobs", "/videos",
        ],
        Category::Streaming,
    ),
    platform("vimeo.com", &["/user*", "/channels/*"], NONE, Category::Streaming),
    platform(
        "open.spotify.com",
        &["/user/*", "/artist/*", "/show/*"],
        NONE,
        Category::Streaming,
    ),
    platform(
        "kick.com",
        &["/*"],
        &["/", "/categories", "/search", "/following", "/browse", "/terms-of-service", "/privacy-policy"],
        Category::Streaming,
    ),
    // Marketplace
    platform("etsy.com", &["/shop/*", "/people/*"], NONE, Category::Marketplace),
    platform("ebay.com", &["/usr/*", "/str/*"], NONE, Category::Marketplace),
    platform("amazon.com", &["/shop/*", "/stores/*"], NONE, Category::Marketplace),
    platform(
        "fiverr.com",
        &["/*"],
        &[
            "/", "/categories", "/search", "/pro", "/business", "/login", "/join", "/support",
            "/resources", "/start_selling", "/gigs", "/cp",
        ],
        Category::Marketplace,
    ),
    platform(
        "upwork.com",
        &["/freelancers/*", "/fl/*", "/o/profiles/*"],
        NONE,
        Category::Marketplace,
    ),
    platform(
        "gumroad.com",
        &["*.gumroad.com", "/*"],
        &[
            "/discover", "/features", "/pricing", "/about", "/login", "/signup", "/help",
            "/blog", "/dashboard", "/library", "/settings",
        ],
        Category::Marketplace,
    ),
    platform(
        "patreon.com",
        &["/*"],
        &[
            "/", "/login", "/signup", "/explore", "/about", "/pricing", "/apps", "/policy",
            "/legal", "/home", "/search", "/settings", "/create", "/messages", "/notifications",
        ],
        Category::Marketplace,
    ),
    platform(
        "ko-fi.com",
        &["/*"],
        &["/", "/explore-creators", "/home", "/account", "/manage", "/about", "/features", "/pricing"],
        Category::Marketplace,
    ),
    platform(
        "buymeacoffee.com",
        &["/*"],
        &["/", "/explore-creators", "/about", "/pricing", "/signup", "/login", "/privacy-policy", "/terms"],
        Category::Marketplace,
    ),
    platform(
        "shopify.com",
        &["*.myshopify.com", "/", "/collections/*", "/products/*", "/pages/*"],
        NONE,
        Category::Marketplace,
    ),
    // Community
    platform("reddit.com", &["/user/*", "/u/*"], NONE, Category::Community),
    platform("news.ycombinator.com", &["/user"], NONE, Category::Community),
    platform("stackoverflow.com", &["/users/*"], NONE, Category::Community),
    platform("discord.com", &["/users/*"], NONE, Category::Community),
    platform("quora.com", &["/profile/*"], NONE, Category::Community),
    platform("producthunt.com", &["/@*"], NONE, Category::Community),
    platform(
        "goodreads.com",
        &["/user/show/*", "/author/show/*"],
        NONE,
        Category::Community,
    ),
    platform(
        "letterboxd.com",
        &["/*"],
        &[
            "/", "/film", "/films", "/lists", "/members", "/journal", "/search", "/about",
            "/pro", "/settings", "/sign-in", "/create-account", "/activity", "/welcome",
        ],
        Category::Community,
    ),
    platform("slack.com", &["*.slack.com", "/team/*"], NONE, Category::Community),
    // Link services
    platform(
        "linktr.ee",
        &["/*"],
        &[
            "/", "/s", "/marketplace", "/blog", "/help", "/login", "/register", "/pricing",
            "/admin", "/privacy", "/terms", "/features",
        ],
        Category::LinkService,
    ),
    platform("bio.link", &["/*"], &["/"], Category::LinkService),
    platform(
        "beacons.ai",
        &["/*"],
        &["/", "/i", "/login", "/signup", "/pricing"],
        Category::LinkService,
    ),
    platform(
        "carrd.co",
        &["*.carrd.co", "/*"],
        &["/docs", "/pro", "/build", "/dashboard", "/login", "/sign-up"],
        Category::LinkService,
    ),
    platform(
        "about.me",
        &["/*"],
        &["/", "/login", "/signup", "/pricing", "/search", "/help", "/legal", "/about"],
        Category::LinkService,
    ),
    platform(
        "lnk.bio",
        &["/*"],
        &["/", "/login", "/signup", "/pricing"],
        Category::LinkService,
    ),
    platform(
        "gravatar.com",
        &["/*"],
        &["/", "/support", "/site", "/connect", "/developers", "/login"],
        Category::LinkService,
    ),
    // Knowledge bases
    platform("wikipedia.org", &["*.wikipedia.org", "/wiki/*"], NONE, Category::KnowledgeBase),
    platform("wikimedia.org", &["*.wikimedia.org", "/wiki/*"], NONE, Category::KnowledgeBase),
    platform("fandom.com", &["*.fandom.com", "/wiki/*"], NONE, Category::KnowledgeBase),
    platform("wikihow.com", &["/*"], NONE, Category::KnowledgeBase),
    platform("imdb.com", &["/name/*", "/title/*", "/user/*"], NONE, Category::KnowledgeBase),
];

// =============================================================================
// Indie Allowlist
// =============================================================================

pub const INDIE_ALLOWLIST: &[IndieDef] = &[
    indie("neocities.org", 1.15, "neocities_community"),
    indie("nekoweb.org", 1.05, "indie_host"),
    // Tilde / pubnix servers
    indie("tilde.club", 1.10, "tilde_community"),
    indie("tilde.town", 1.10, "tilde_community"),
    indie("tilde.team", 1.10, "tilde_community"),
    indie("tilde.institute", 1.10, "tilde_community"),
    indie("ctrl-c.club", 1.10, "tilde_community"),
    indie("rawtext.club", 1.10, "tilde_community"),
    indie("sdf.org", 1.10, "tilde_community"),
    indie("envs.net", 1.10, "tilde_community"),
    indie("cosmic.voyage", 1.10, "tilde_community"),
    // Small blogging platforms
    indie("bearblog.dev", 1.10, "bear_blog"),
    indie("omg.lol", 1.10, "omg_lol"),
    indie("midnight.pub", 1.10, "midnight_pub"),
    indie("smol.pub", 1.10, "smol_pub"),
    indie("micro.blog", 1.10, "micro_blog"),
    indie("write.as", 1.05, "indie_host"),
    indie("mataroa.blog", 1.05, "indie_host"),
    indie("prose.sh", 1.05, "indie_host"),
    indie("pika.page", 1.05, "indie_host"),
    indie("status.cafe", 1.05, "indie_host"),
    indie("yesterweb.org", 1.05, "indie_host"),
    // Static hosting
    indie("github.io", 1.05, "github_pages"),
    indie("gitlab.io", 1.05, "gitlab_pages"),
    indie("codeberg.page", 1.05, "codeberg_pages"),
    indie("srht.site", 1.05, "sourcehut_pages"),
    indie("pages.dev", 1.05, "static_host"),
    indie("netlify.app", 1.0, "static_host"),
    indie("vercel.app", 1.0, "static_host"),
    indie("surge.sh", 1.0, "static_host"),
];

/// Shared servers that host `/~user` pages.
pub const TILDE_HOSTS: &[&str] = &[
    "tilde.club",
    "tilde.town",
    "tilde.team",
    "tilde.institute",
    "ctrl-c.club",
    "rawtext.club",
    "sdf.org",
    "envs.net",
    "hashbang.sh",
    "thunix.net",
    "cosmic.voyage",
];

// =============================================================================
// Shorteners and Federated Instances
// =============================================================================

pub const URL_SHORTENERS: &[&str] = &[
    "bit.ly", "t.co", "tinyurl.com", "goo.gl", "ow.ly", "is.gd", "buff.ly", "rebrand.ly",
    "cutt.ly", "shorturl.at", "tiny.cc", "lnkd.in", "youtu.be", "amzn.to", "db.tt", "s.id",
    "v.gd", "rb.gy", "t.ly", "bl.ink",
];

/// Centrally run instances that share suffixes with small community servers.
pub const LARGE_FEDERATED_INSTANCES: &[&str] = &[
    "mastodon.social",
    "mstdn.social",
    "pixelfed.social",
    "techhub.social",
    "bsky.social",
    "truth.social",
    "kbin.social",
    "mastodon.online",
    "mastodon.world",
    "mas.to",
];

/// Hostname shapes that look like a federated instance.
pub const FEDERATED_HOST_PATTERNS: &[&str] = &[
    r"^mastodon\.",
    r"^mstdn\.",
    r"^mas\.",
    r"\.social$",
    r"\.community$",
    r"\.im$",
    r"\.club$",
];

/// Suffixes that mark a small community instance.
pub const INDIE_FEDERATED_SUFFIXES: &[&str] = &[".social", ".community", ".club", ".im"];

/// Hosted blog subdomains (`name.platform.tld`).
pub const SUBDOMAIN_BLOG_PATTERN: &str =
    r"^[^.]+\.(wordpress|blogspot|tumblr|medium|substack|ghost|wixsite|squarespace|weebly)\.(com|io)$";

/// Hosted blog base domain to canonical brand domain.
pub const BLOG_BRANDS: &[(&str, &str)] = &[
    ("wordpress.com", "wordpress.com"),
    ("blogspot.com", "blogger.com"),
    ("tumblr.com", "tumblr.com"),
    ("medium.com", "medium.com"),
    ("substack.com", "substack.com"),
    ("ghost.io", "ghost.org"),
    ("wixsite.com", "wix.com"),
    ("squarespace.com", "squarespace.com"),
    ("weebly.com", "weebly.com"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_platform_domains_unique_and_normalized() {
        let mut seen = HashSet::new();
        for def in PLATFORMS {
            assert!(seen.insert(def.domain), "duplicate platform {}", def.domain);
            assert_eq!(def.domain, def.domain.to_ascii_lowercase());
            assert!(!def.domain.starts_with("www."));
            assert!(!def.profile.is_empty(), "{} has no profile patterns", def.domain);
        }
        assert!(PLATFORMS.len() >= 70);
    }

    #[test]
    fn test_indie_entries_not_registered_as_platforms() {
        let platforms: HashSet<_> = PLATFORMS.iter().map(|p| p.domain).collect();
        for entry in INDIE_ALLOWLIST {
            assert!(!platforms.contains(entry.domain), "{} is in both tables", entry.domain);
        }
    }

    #[test]
    fn test_hosted_blog_bases_have_no_wildcards() {
        // Wildcards on these would shadow the subdomain-blog rule.
        for def in PLATFORMS {
            for pattern in def.profile {
                if let Some(base) = pattern.strip_prefix("*.") {
                    assert!(BLOG_BRANDS.iter().all(|(b, _)| *b != base), "{}", base);
                }
            }
        }
    }
}
