//! Route table.
//!
//! | Path                                  | Route      |
//! |---------------------------------------|------------|
//! | `/objects`                            | `Objects`  |
//! | `/objects/{class}`                    | `ObjectClass` |
//! | `/objects/{class}/{name}`             | `Object`   |
//! | `/status`                             | `Status`   |
//! | `/status/{host}`                      | `Host`     |
//! | `/status/{host}/services`             | `Services` |
//! | `/status/{host}/services/{service}`   | `Service`  |
//! | `/api`                                | `Api`      |

use percent_encoding::percent_decode_str;

/// A matched route with its decoded parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Objects,
    ObjectClass { class: String },
    Object { class: String, name: String },
    Status,
    Host { host: String },
    Services { host: String },
    Service { host: String, service: String },
    /// API description, not implemented.
    Api,
}

impl Route {
    /// Match a path with format and mode suffixes already stripped.
    pub fn match_path(path: &str) -> Option<Route> {
        let segments: Vec<&str> = path.strip_prefix('/')?.split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return None;
        }

        let route = match segments.as_slice() {
            ["objects"] => Route::Objects,
            ["objects", class] => Route::ObjectClass { class: param(class)? },
            ["objects", class, name] => Route::Object {
                class: param(class)?,
                name: param(name)?,
            },
            ["status"] => Route::Status,
            ["status", host] => Route::Host { host: param(host)? },
            ["status", host, "services"] => Route::Services { host: param(host)? },
            ["status", host, "services", service] => Route::Service {
                host: param(host)?,
                service: param(service)?,
            },
            ["api"] => Route::Api,
            _ => return None,
        };
        Some(route)
    }

    /// Route pattern, used as a metrics label.
    pub fn pattern(&self) -> &'static str {
        match self {
            Route::Objects => "/objects",
            Route::ObjectClass { .. } => "/objects/:type",
            Route::Object { .. } => "/objects/:type/:name",
            Route::Status => "/status",
            Route::Host { .. } => "/status/:hostname",
            Route::Services { .. } => "/status/:hostname/services",
            Route::Service { .. } => "/status/:hostname/services/:service",
            Route::Api => "/api",
        }
    }
}

fn param(segment: &str) -> Option<String> {
    let decoded = percent_decode_str(segment).decode_utf8().ok()?;
    (!decoded.contains('/')).then(|| decoded.into_owned())
}
