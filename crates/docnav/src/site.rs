//! Build the navigation resolver from loaded configuration.

use docnav_config::Config;
use docnav_site::{
    Footer, HeadTag, NavLink, SidebarSection, Site, SiteConfig, SocialLink, ThemeOptions,
};

use crate::error::CliError;

/// Convert file configuration into a validated [`Site`].
///
/// # Errors
///
/// Returns `CliError::Config` if the `[site]` section is missing and
/// `CliError::Site` if the navigation tree fails validation.
pub(crate) fn site_from_config(config: &Config) -> Result<Site, CliError> {
    let site = config.require_site()?;

    let mut builder = SiteConfig::builder(site.title.clone());
    builder.set_base(site.base.clone());
    if let Some(template) = &site.title_template {
        builder.set_title_template(template.clone());
    }
    if let Some(description) = &site.description {
        builder.set_description(description.clone());
    }
    for head in &site.head {
        builder.add_head_tag(HeadTag {
            tag: head.tag.clone(),
            attrs: head.attrs.clone(),
            content: head.content.clone(),
        });
    }

    builder.set_theme(ThemeOptions {
        logo: config.theme.logo.clone(),
        footer: config.theme.footer.as_ref().map(|footer| Footer {
            message: footer.message.clone(),
            copyright: footer.copyright.clone(),
        }),
        social_links: config
            .theme
            .social_links
            .iter()
            .map(|link| SocialLink {
                icon: link.icon.clone(),
                link: link.link.clone(),
            })
            .collect(),
    });

    for entry in &config.nav {
        let mut link = NavLink::new(entry.text.clone(), entry.link.clone());
        if let Some(prefix) = &entry.active_match {
            link = link.with_active_match(prefix.clone());
        }
        builder.add_nav_link(link);
    }

    for entry in &config.sidebar {
        let sections = entry
            .sections
            .iter()
            .map(|section| {
                SidebarSection::new(
                    section.text.clone(),
                    section
                        .items
                        .iter()
                        .map(|item| NavLink::new(item.text.clone(), item.link.clone()))
                        .collect(),
                )
            })
            .collect();
        builder.add_scope(entry.scope.clone(), sections);
    }

    let site_config = builder.build()?;
    tracing::debug!(
        title = site_config.title(),
        scopes = site_config.sidebar().len(),
        nav_links = site_config.nav().len(),
        "Site configuration validated"
    );
    Ok(Site::new(site_config))
}
