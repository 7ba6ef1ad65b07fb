use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Экран клиентского приложения.
pub enum Route {
    /// Список постов, `/`.
    Listing,
    /// Создание поста, `/post/add`.
    CreatePost,
    /// Просмотр поста, `/posts/:id`.
    PostDetail(i64),
    /// Редактирование поста, `/post/edit/:id`.
    EditPost(i64),
    /// Очистка неиспользуемых изображений, `/admin/images/cleanup`.
    AdminImageCleanup,
    /// Любой другой путь.
    NotFound,
}

impl Route {
    /// Сопоставляет путь (без query и fragment) с экраном.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Listing,
            ["post", "add"] => Self::CreatePost,
            ["posts", id] => parse_id(id).map_or(Self::NotFound, Self::PostDetail),
            ["post", "edit", id] => parse_id(id).map_or(Self::NotFound, Self::EditPost),
            ["admin", "images", "cleanup"] => Self::AdminImageCleanup,
            _ => Self::NotFound,
        }
    }

    /// Канонический путь экрана.
    pub fn path(&self) -> String {
        match self {
            Self::Listing | Self::NotFound => "/".to_string(),
            Self::CreatePost => "/post/add".to_string(),
            Self::PostDetail(id) => format!("/posts/{id}"),
            Self::EditPost(id) => format!("/post/edit/{id}"),
            Self::AdminImageCleanup => "/admin/images/cleanup".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_screen() {
        assert_eq!(Route::parse("/"), Route::Listing);
        assert_eq!(Route::parse(""), Route::Listing);
        assert_eq!(Route::parse("/post/add"), Route::CreatePost);
        assert_eq!(Route::parse("/posts/42"), Route::PostDetail(42));
        assert_eq!(Route::parse("/post/edit/7/"), Route::EditPost(7));
        assert_eq!(Route::parse("/admin/images/cleanup"), Route::AdminImageCleanup);
    }

    #[test]
    fn ignores_query_and_fragment() {
        assert_eq!(Route::parse("/posts/3?from=list#top"), Route::PostDetail(3));
    }

    #[test]
    fn unknown_paths_and_bad_ids_are_not_found() {
        assert_eq!(Route::parse("/board"), Route::NotFound);
        assert_eq!(Route::parse("/posts/abc"), Route::NotFound);
        assert_eq!(Route::parse("/post/edit"), Route::NotFound);
    }

    #[test]
    fn path_round_trips_through_parse() {
        for route in [
            Route::Listing,
            Route::CreatePost,
            Route::PostDetail(5),
            Route::EditPost(9),
            Route::AdminImageCleanup,
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }
}
