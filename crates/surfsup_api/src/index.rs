//! Route discovery pages.

use axum::response::Html;
use axum::Json;
use serde::Serialize;
use std::collections::BTreeMap;

struct RouteDoc {
    path: &'static str,
    example: &'static str,
    description: &'static str,
}

const ROUTES: &[RouteDoc] = &[
    RouteDoc {
        path: "/api/v1.0/precipitation",
        example: "/api/v1.0/precipitation",
        description: "Precipitation by date for the last 12 months of data",
    },
    RouteDoc {
        path: "/api/v1.0/stations",
        example: "/api/v1.0/stations",
        description: "List of all stations",
    },
    RouteDoc {
        path: "/api/v1.0/tobs",
        example: "/api/v1.0/tobs",
        description: "Temperature observations for the most active station over the last 12 months",
    },
    RouteDoc {
        path: "/api/v1.0/&lt;start&gt;",
        example: "/api/v1.0/2017-01-01",
        description: "TMIN, TAVG and TMAX for all dates on or after start (YYYY-MM-DD)",
    },
    RouteDoc {
        path: "/api/v1.0/&lt;start&gt;/&lt;end&gt;",
        example: "/api/v1.0/2017-01-01/2017-01-07",
        description: "TMIN, TAVG and TMAX for dates between start and end inclusive",
    },
];

pub(crate) async fn home() -> Html<String> {
    let mut items = String::new();
    for route in ROUTES {
        items.push_str(&format!(
            "<li><code>{}</code> &mdash; {} (e.g. <a href=\"{}\">{}</a>)</li>\n",
            route.path, route.description, route.example, route.example
        ));
    }

    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><title>SurfsUp Climate API</title></head>\n<body>\n\
         <h1>SurfsUp Climate API</h1>\n<p>Available routes:</p>\n<ul>\n{items}</ul>\n\
         <p>Dates use the format YYYY-MM-DD.</p>\n</body>\n</html>\n"
    ))
}

#[derive(Serialize)]
pub(crate) struct RouteIndex {
    routes: BTreeMap<&'static str, &'static str>,
}

/// Machine-readable route list.
pub(crate) async fn jsonified() -> Json<RouteIndex> {
    let routes = ROUTES
        .iter()
        .map(|route| (route.example, route.description))
        .collect();
    Json(RouteIndex { routes })
}
