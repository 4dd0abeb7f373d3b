//! The forum's dispatch table.
//!
//! # Responsibilities
//! - Bind every named route to its handler slot
//! - Mount the prefix-stripped static asset services
//! - Provide the default not-found path
//!
//! # Design Decisions
//! - The table is data-free and built once at startup; axum routers are
//!   immutable after construction, so no synchronization is ever needed
//! - Handlers are injected: the forum application owns their behavior, the
//!   table only owns the shape. Method policing stays inside the handlers,
//!   so slots are `MethodRouter`s rather than verb-fixed routes

use axum::http::StatusCode;
use axum::routing::MethodRouter;
use axum::Router;
use tower_http::services::ServeDir;

use crate::config::AssetConfig;

/// Page-rendering handlers.
#[derive(Clone)]
pub struct PageHandlers {
    /// `/`
    pub main: MethodRouter,
    /// `/posts/{id}`
    pub post_detail: MethodRouter,
    /// `/category/{name}`
    pub category: MethodRouter,
    /// `/my_posts`
    pub my_posts: MethodRouter,
    /// `/liked_posts`
    pub liked_posts: MethodRouter,
    /// `/user_profile`
    pub profile: MethodRouter,
}

/// Session and OAuth login handlers.
#[derive(Clone)]
pub struct AuthHandlers {
    /// `/sign_in`
    pub sign_in: MethodRouter,
    /// `/sign_up`
    pub sign_up: MethodRouter,
    /// `/sign_out`
    pub sign_out: MethodRouter,
    /// `/login`
    pub google_login: MethodRouter,
    /// `/auth/callback`
    pub google_callback: MethodRouter,
    /// `/login_github`
    pub github_login: MethodRouter,
    /// `/auth/github/callback`
    pub github_callback: MethodRouter,
}

/// Post CRUD and reaction handlers.
#[derive(Clone)]
pub struct PostHandlers {
    /// `/create_post`
    pub create: MethodRouter,
    /// `/delete_post`
    pub delete: MethodRouter,
    /// `/react`
    pub react: MethodRouter,
}

/// Comment CRUD and reaction handlers.
#[derive(Clone)]
pub struct CommentHandlers {
    /// `/comment`
    pub create: MethodRouter,
    /// `/react_comment`
    pub react: MethodRouter,
    /// `/delete_comment`
    pub delete: MethodRouter,
}

/// Admin moderation handlers.
#[derive(Clone)]
pub struct ModerationHandlers {
    /// `/apply`
    pub apply: MethodRouter,
    /// `/admin_page`
    pub admin_page: MethodRouter,
    /// `/admin_page_allow`
    pub allow: MethodRouter,
    /// `/admin_page_deny`
    pub deny: MethodRouter,
    /// `/admin_page_demote_to_user`
    pub demote_to_user: MethodRouter,
    /// `/report_to_admin`
    pub report: MethodRouter,
    /// `/send_reply`
    pub send_reply: MethodRouter,
    /// `/delete_report_from_admin`
    pub delete_report: MethodRouter,
    /// `/delete_reply_from_admin`
    pub delete_reply: MethodRouter,
}

/// The fixed collection of handlers the table dispatches to.
///
/// The forum application supplies the real handlers; this crate treats them
/// as an opaque capability and only wires them to paths. Tests substitute
/// counting stubs the same way.
#[derive(Clone)]
pub struct HandlerSet {
    pub pages: PageHandlers,
    pub auth: AuthHandlers,
    pub posts: PostHandlers,
    pub comments: CommentHandlers,
    pub moderation: ModerationHandlers,
}

impl HandlerSet {
    /// A set where every named route shares one handler.
    ///
    /// Used by the binary until the application handlers are wired, and by
    /// tests that only care about what reaches the table at all.
    pub fn uniform(handler: MethodRouter) -> Self {
        Self {
            pages: PageHandlers {
                main: handler.clone(),
                post_detail: handler.clone(),
                category: handler.clone(),
                my_posts: handler.clone(),
                liked_posts: handler.clone(),
                profile: handler.clone(),
            },
            auth: AuthHandlers {
                sign_in: handler.clone(),
                sign_up: handler.clone(),
                sign_out: handler.clone(),
                google_login: handler.clone(),
                google_callback: handler.clone(),
                github_login: handler.clone(),
                github_callback: handler.clone(),
            },
            posts: PostHandlers {
                create: handler.clone(),
                delete: handler.clone(),
                react: handler.clone(),
            },
            comments: CommentHandlers {
                create: handler.clone(),
                react: handler.clone(),
                delete: handler.clone(),
            },
            moderation: ModerationHandlers {
                apply: handler.clone(),
                admin_page: handler.clone(),
                allow: handler.clone(),
                deny: handler.clone(),
                demote_to_user: handler.clone(),
                report: handler.clone(),
                send_reply: handler.clone(),
                delete_report: handler.clone(),
                delete_reply: handler,
            },
        }
    }
}

/// Build the complete dispatch table.
///
/// Exact-path routes map 1:1 to handler slots; the two asset prefixes are
/// stripped and resolved against directory-backed services; anything else
/// falls through to 404.
pub fn forum_router(handlers: HandlerSet, assets: &AssetConfig) -> Router {
    let HandlerSet {
        pages,
        auth,
        posts,
        comments,
        moderation,
    } = handlers;

    Router::new()
        // Static assets, prefix stripped before the directory lookup.
        .nest_service("/css", ServeDir::new(&assets.css_dir))
        .nest_service("/web/images", ServeDir::new(&assets.images_dir))
        // Pages
        .route("/", pages.main)
        .route("/posts/{id}", pages.post_detail)
        .route("/category/{name}", pages.category)
        .route("/my_posts", pages.my_posts)
        .route("/liked_posts", pages.liked_posts)
        .route("/user_profile", pages.profile)
        // Authentication
        .route("/sign_in", auth.sign_in)
        .route("/sign_up", auth.sign_up)
        .route("/sign_out", auth.sign_out)
        .route("/login", auth.google_login)
        .route("/auth/callback", auth.google_callback)
        .route("/login_github", auth.github_login)
        .route("/auth/github/callback", auth.github_callback)
        // Posts
        .route("/create_post", posts.create)
        .route("/delete_post", posts.delete)
        .route("/react", posts.react)
        // Comments
        .route("/comment", comments.create)
        .route("/react_comment", comments.react)
        .route("/delete_comment", comments.delete)
        // Moderation
        .route("/apply", moderation.apply)
        .route("/admin_page", moderation.admin_page)
        .route("/admin_page_allow", moderation.allow)
        .route("/admin_page_deny", moderation.deny)
        .route("/admin_page_demote_to_user", moderation.demote_to_user)
        .route("/report_to_admin", moderation.report)
        .route("/send_reply", moderation.send_reply)
        .route("/delete_report_from_admin", moderation.delete_report)
        .route("/delete_reply_from_admin", moderation.delete_reply)
        .fallback(not_found)
}

/// Default path for unmatched routes.
async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "404 page not found")
}
