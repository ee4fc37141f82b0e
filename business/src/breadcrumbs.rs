//! Breadcrumb trail for a dashboard route.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub label: String,
    pub href: String,
}

/// `/dashboard/startup-applications/42?tab=1` →
/// `Dashboard (/dashboard) › Startup Applications (/dashboard/startup-applications) › 42 (...)`.
pub fn generate_breadcrumbs(path: &str) -> Vec<Breadcrumb> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let mut href = String::new();

    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            href.push('/');
            href.push_str(segment);
            Breadcrumb {
                label: humanize(segment),
                href: href.clone(),
            }
        })
        .collect()
}

/// Same as [`generate_breadcrumbs`] with a leading `Home` crumb.
pub fn generate_breadcrumbs_with_home(path: &str) -> Vec<Breadcrumb> {
    let mut crumbs = vec![Breadcrumb {
        label: "Home".to_owned(),
        href: "/".to_owned(),
    }];
    crumbs.extend(generate_breadcrumbs(path));
    crumbs
}

fn humanize(segment: &str) -> String {
    segment
        .split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_route() {
        let crumbs = generate_breadcrumbs("/dashboard/startup-applications/42");
        let labels: Vec<&str> = crumbs.iter().map(|c| c.label.as_str()).collect();
        let hrefs: Vec<&str> = crumbs.iter().map(|c| c.href.as_str()).collect();

        assert_eq!(labels, ["Dashboard", "Startup Applications", "42"]);
        assert_eq!(
            hrefs,
            [
                "/dashboard",
                "/dashboard/startup-applications",
                "/dashboard/startup-applications/42"
            ]
        );
    }

    #[test]
    fn test_query_and_slashes_are_ignored() {
        let crumbs = generate_breadcrumbs("//contacts//due_diligence/?tab=mentor#top");
        assert_eq!(crumbs.len(), 2);
        assert_eq!(crumbs[1].label, "Due Diligence");
        assert_eq!(crumbs[1].href, "/contacts/due_diligence");
    }

    #[test]
    fn test_root_has_no_crumbs() {
        assert!(generate_breadcrumbs("/").is_empty());
        assert_eq!(generate_breadcrumbs_with_home("/").len(), 1);
    }

    #[test]
    fn test_home_is_prepended() {
        let crumbs = generate_breadcrumbs_with_home("/thesis");
        assert_eq!(crumbs[0].href, "/");
        assert_eq!(crumbs[1].label, "Thesis");
    }
}
