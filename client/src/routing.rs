//! Route table and navigation guard.
//!
//! Path matching is deliberately small: exact segments plus a single
//! `:slug` parameter. Rendering and history belong to the embedding shell;
//! this module only decides which route a path names and whether an
//! unauthenticated visitor may enter it.

use tracing::debug;

/// Route names, one per navigable screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteName {
    /// Landing page, also the redirect target for rejected navigation.
    Home,
    /// Full catalogue listing.
    Courses,
    /// Public detail page for one course.
    CourseDetail,
    /// Purchased-courses dashboard, sign-in required.
    MyCourses,
    /// Lesson player, sign-in required.
    CourseLearn,
}

/// One registered route pattern.
#[derive(Debug, Clone)]
struct Route {
    name: RouteName,
    /// Pattern segments; `:slug` marks the parameter position.
    segments: &'static [&'static str],
    requires_auth: bool,
}

/// Outcome of matching a concrete path against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    name: RouteName,
    slug: Option<String>,
    requires_auth: bool,
}

impl RouteMatch {
    /// Which route the path named.
    pub fn name(&self) -> RouteName {
        self.name
    }

    /// The `:slug` parameter, when the route carries one.
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    /// Whether the route is behind the sign-in guard.
    pub fn requires_auth(&self) -> bool {
        self.requires_auth
    }
}

/// Decision returned by the navigation guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Navigation may continue.
    Proceed,
    /// Navigation is rejected; the shell should go to `target` instead.
    Redirect {
        /// Replacement path, always the entry route.
        target: &'static str,
    },
}

/// Ordered collection of route patterns.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// The application's navigable surface.
    pub fn standard() -> Self {
        Self {
            routes: vec![
                Route {
                    name: RouteName::Home,
                    segments: &[],
                    requires_auth: false,
                },
                Route {
                    name: RouteName::Courses,
                    segments: &["courses"],
                    requires_auth: false,
                },
                Route {
                    name: RouteName::CourseDetail,
                    segments: &["course", ":slug"],
                    requires_auth: false,
                },
                Route {
                    name: RouteName::MyCourses,
                    segments: &["my-courses"],
                    requires_auth: true,
                },
                Route {
                    name: RouteName::CourseLearn,
                    segments: &["course", ":slug", "learn"],
                    requires_auth: true,
                },
            ],
        }
    }

    /// Match `path` against the table, extracting the slug parameter.
    ///
    /// Trailing slashes are tolerated; unknown paths return `None`.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let trimmed = path.trim_start_matches('/').trim_end_matches('/');
        let segments: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };
        self.routes
            .iter()
            .find_map(|route| match_route(route, &segments))
    }

    /// Decide whether navigation to `matched` may proceed.
    pub fn guard(&self, matched: &RouteMatch, is_authenticated: bool) -> GuardDecision {
        if matched.requires_auth && !is_authenticated {
            debug!(route = ?matched.name, "redirecting unauthenticated visitor");
            return GuardDecision::Redirect { target: "/" };
        }
        GuardDecision::Proceed
    }
}

fn match_route(route: &Route, segments: &[&str]) -> Option<RouteMatch> {
    if route.segments.len() != segments.len() {
        return None;
    }
    let mut slug = None;
    for (pattern, actual) in route.segments.iter().zip(segments) {
        if *pattern == ":slug" {
            if actual.is_empty() {
                return None;
            }
            slug = Some((*actual).to_owned());
        } else if pattern != actual {
            return None;
        }
    }
    Some(RouteMatch {
        name: route.name,
        slug,
        requires_auth: route.requires_auth,
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::{GuardDecision, RouteName, RouteTable};

    #[rstest]
    #[case("/", RouteName::Home, None)]
    #[case("/courses", RouteName::Courses, None)]
    #[case("/courses/", RouteName::Courses, None)]
    #[case("/course/rust-debutant", RouteName::CourseDetail, Some("rust-debutant"))]
    #[case("/my-courses", RouteName::MyCourses, None)]
    #[case(
        "/course/rust-debutant/learn",
        RouteName::CourseLearn,
        Some("rust-debutant")
    )]
    fn known_paths_resolve(
        #[case] path: &str,
        #[case] expected: RouteName,
        #[case] slug: Option<&str>,
    ) {
        let table = RouteTable::standard();
        let matched = table.resolve(path).expect("path should resolve");
        assert_eq!(matched.name(), expected);
        assert_eq!(matched.slug(), slug);
    }

    #[rstest]
    #[case("/unknown")]
    #[case("/course")]
    #[case("/course//learn")]
    #[case("/course/slug/learn/extra")]
    fn unknown_paths_do_not_resolve(#[case] path: &str) {
        let table = RouteTable::standard();
        assert!(table.resolve(path).is_none());
    }

    #[rstest]
    #[case("/my-courses")]
    #[case("/course/rust-debutant/learn")]
    fn gated_routes_redirect_unauthenticated_visitors(#[case] path: &str) {
        let table = RouteTable::standard();
        let matched = table.resolve(path).expect("path should resolve");
        assert_eq!(
            table.guard(&matched, false),
            GuardDecision::Redirect { target: "/" }
        );
        assert_eq!(table.guard(&matched, true), GuardDecision::Proceed);
    }

    #[test]
    fn public_routes_admit_everyone() {
        let table = RouteTable::standard();
        let matched = table.resolve("/courses").expect("path should resolve");
        assert_eq!(table.guard(&matched, false), GuardDecision::Proceed);
    }
}
