//! The portal's own permission tables.
//!
//! Codes are declared once as constants; the route, button and role tables
//! below only ever refer to these constants.

use std::collections::BTreeMap;

use crate::{
    ButtonPermissionTable, MenuNode, PermissionCatalog, PermissionCode, Role, RoleDefinition,
    RoutePermissionTable, TableError,
};

macro_rules! permission_group {
    ($module:ident, $domain:literal, { $($name:ident => $key:literal : $code:literal),+ $(,)? }) => {
        pub mod $module {
            use crate::PermissionCode;

            pub const DOMAIN: &str = $domain;

            $(pub const $name: PermissionCode = PermissionCode::from_static($code);)+

            pub fn entries() -> Vec<(&'static str, PermissionCode)> {
                vec![$(($key, $name)),+]
            }
        }
    };
}

/// Permission codes by feature domain.
pub mod codes {
    permission_group!(user, "USER", {
        LIST => "list": "admin:user:list",
        DETAIL => "detail": "admin:user:detail",
        CREATE => "create": "admin:user:create",
        EDIT => "edit": "admin:user:edit",
        DELETE => "delete": "admin:user:delete",
        DISABLE => "disable": "admin:user:disable",
        RESET_PASSWORD => "reset_password": "admin:user:reset-password",
    });

    permission_group!(video, "VIDEO", {
        LIST => "list": "admin:video:list",
        DETAIL => "detail": "admin:video:detail",
        CREATE => "create": "admin:video:create",
        EDIT => "edit": "admin:video:edit",
        DELETE => "delete": "admin:video:delete",
        AUDIT => "audit": "admin:video:audit",
        PUBLISH => "publish": "admin:video:publish",
        CATEGORY_LIST => "category_list": "admin:video:category:list",
        CATEGORY_CREATE => "category_create": "admin:video:category:create",
        CATEGORY_EDIT => "category_edit": "admin:video:category:edit",
        CATEGORY_DELETE => "category_delete": "admin:video:category:delete",
    });

    permission_group!(document, "DOCUMENT", {
        LIST => "list": "admin:document:list",
        DETAIL => "detail": "admin:document:detail",
        UPLOAD => "upload": "admin:document:upload",
        EDIT => "edit": "admin:document:edit",
        DELETE => "delete": "admin:document:delete",
        AUDIT => "audit": "admin:document:audit",
        DOWNLOAD => "download": "admin:document:download",
    });

    permission_group!(dictionary, "DICTIONARY", {
        LIST => "list": "admin:dictionary:list",
        CREATE => "create": "admin:dictionary:create",
        EDIT => "edit": "admin:dictionary:edit",
        DELETE => "delete": "admin:dictionary:delete",
    });

    permission_group!(points, "POINTS", {
        LIST => "list": "admin:points:list",
        ADJUST => "adjust": "admin:points:adjust",
        EXPORT => "export": "admin:points:export",
        RULE_LIST => "rule_list": "admin:points:rule:list",
        RULE_EDIT => "rule_edit": "admin:points:rule:edit",
    });

    permission_group!(content, "CONTENT", {
        LIST => "list": "admin:content:list",
        CREATE => "create": "admin:content:create",
        EDIT => "edit": "admin:content:edit",
        DELETE => "delete": "admin:content:delete",
        PUBLISH => "publish": "admin:content:publish",
        BANNER_LIST => "banner_list": "admin:content:banner:list",
        BANNER_EDIT => "banner_edit": "admin:content:banner:edit",
        NOTICE_LIST => "notice_list": "admin:content:notice:list",
        NOTICE_EDIT => "notice_edit": "admin:content:notice:edit",
    });

    permission_group!(system, "SYSTEM", {
        DASHBOARD => "dashboard": "admin:system:dashboard",
        SETTINGS => "settings": "admin:system:settings",
        ROLE_LIST => "role_list": "admin:system:role:list",
        ROLE_EDIT => "role_edit": "admin:system:role:edit",
        LOG_LIST => "log_list": "admin:system:log:list",
    });
}

use codes::{content, dictionary, document, points, system, user, video};

pub mod roles {
    use crate::Role;

    pub const ADMIN: Role = Role::from_static("ADMIN");
    pub const EDITOR: Role = Role::from_static("EDITOR");
    pub const OPERATOR: Role = Role::from_static("OPERATOR");
    pub const USER: Role = Role::from_static("USER");
}

pub fn catalog() -> Result<PermissionCatalog, TableError> {
    PermissionCatalog::builder()
        .group(user::DOMAIN, user::entries())
        .group(video::DOMAIN, video::entries())
        .group(document::DOMAIN, document::entries())
        .group(dictionary::DOMAIN, dictionary::entries())
        .group(points::DOMAIN, points::entries())
        .group(content::DOMAIN, content::entries())
        .group(system::DOMAIN, system::entries())
        .build()
}

fn role(groups: &[&str], description: &str) -> RoleDefinition {
    RoleDefinition {
        groups: groups.iter().map(|g| g.to_string()).collect(),
        permissions: Vec::new(),
        description: Some(description.to_string()),
    }
}

pub fn role_definitions() -> BTreeMap<Role, RoleDefinition> {
    let mut definitions = BTreeMap::new();
    definitions.insert(
        roles::ADMIN,
        role(
            &[
                user::DOMAIN,
                video::DOMAIN,
                document::DOMAIN,
                dictionary::DOMAIN,
                points::DOMAIN,
                content::DOMAIN,
                system::DOMAIN,
            ],
            "Back-office administrator with every permission",
        ),
    );
    definitions.insert(
        roles::EDITOR,
        role(
            &[video::DOMAIN, document::DOMAIN, content::DOMAIN, dictionary::DOMAIN],
            "Editor managing videos, documents and site content",
        ),
    );
    definitions.insert(
        roles::OPERATOR,
        role(
            &[user::DOMAIN, points::DOMAIN, content::DOMAIN],
            "Operations staff managing members, points and notices",
        ),
    );
    definitions.insert(roles::USER, role(&[], "Portal member without back-office access"));
    definitions
}

pub fn routes() -> RoutePermissionTable {
    RoutePermissionTable::new()
        // public
        .with_route("/", [])
        .with_route("/login", [])
        .with_route("/video/:id", [])
        .with_route("/document/:id", [])
        // back office
        .with_route("/admin/dashboard", [system::DASHBOARD])
        .with_route("/admin/user/list", [user::LIST])
        .with_route("/admin/user/detail/:id", [user::DETAIL])
        .with_route("/admin/user/create", [user::CREATE])
        .with_route("/admin/user/edit/:id", [user::EDIT])
        .with_route("/admin/video/list", [video::LIST])
        .with_route("/admin/video/detail/:id", [video::DETAIL])
        .with_route("/admin/video/upload", [video::CREATE])
        .with_route("/admin/video/audit", [video::AUDIT])
        .with_route("/admin/video/category", [video::CATEGORY_LIST])
        .with_route("/admin/document/list", [document::LIST])
        .with_route("/admin/document/detail/:id", [document::DETAIL])
        .with_route("/admin/document/upload", [document::UPLOAD])
        .with_route("/admin/document/audit", [document::AUDIT])
        .with_route("/admin/dictionary/list", [dictionary::LIST])
        .with_route("/admin/points/list", [points::LIST])
        .with_route("/admin/points/rules", [points::RULE_LIST])
        .with_route("/admin/content/list", [content::LIST])
        .with_route("/admin/content/banner", [content::BANNER_LIST])
        .with_route("/admin/content/notice", [content::NOTICE_LIST])
        .with_route("/admin/system/settings", [system::SETTINGS])
        .with_route("/admin/system/role", [system::ROLE_LIST])
        .with_route("/admin/system/log", [system::LOG_LIST])
}

pub fn buttons() -> ButtonPermissionTable {
    ButtonPermissionTable::new()
        .with_page(
            "/admin/user/list",
            [user::CREATE, user::EDIT, user::DELETE, user::DISABLE, user::RESET_PASSWORD],
        )
        .with_page(
            "/admin/video/list",
            [video::CREATE, video::EDIT, video::DELETE, video::PUBLISH],
        )
        .with_page("/admin/video/audit", [video::AUDIT])
        .with_page(
            "/admin/video/category",
            [video::CATEGORY_CREATE, video::CATEGORY_EDIT, video::CATEGORY_DELETE],
        )
        .with_page(
            "/admin/document/list",
            [document::UPLOAD, document::EDIT, document::DELETE, document::DOWNLOAD],
        )
        .with_page("/admin/document/audit", [document::AUDIT])
        .with_page(
            "/admin/dictionary/list",
            [dictionary::CREATE, dictionary::EDIT, dictionary::DELETE],
        )
        .with_page("/admin/points/list", [points::ADJUST, points::EXPORT])
        .with_page("/admin/points/rules", [points::RULE_EDIT])
        .with_page(
            "/admin/content/list",
            [content::CREATE, content::EDIT, content::DELETE, content::PUBLISH],
        )
        .with_page("/admin/content/banner", [content::BANNER_EDIT])
        .with_page("/admin/content/notice", [content::NOTICE_EDIT])
        .with_page("/admin/system/role", [system::ROLE_EDIT])
}

fn entry(path: &str, title: &str, code: PermissionCode) -> MenuNode {
    MenuNode::leaf(path).with_title(title).with_permission(code)
}

/// Back-office side menu.
pub fn admin_menu() -> Vec<MenuNode> {
    vec![
        entry("/admin/dashboard", "Dashboard", system::DASHBOARD),
        MenuNode::branch(
            "/admin/user",
            vec![entry("/admin/user/list", "Members", user::LIST)],
        )
        .with_title("Users"),
        MenuNode::branch(
            "/admin/video",
            vec![
                entry("/admin/video/list", "Videos", video::LIST),
                entry("/admin/video/audit", "Review queue", video::AUDIT),
                entry("/admin/video/category", "Categories", video::CATEGORY_LIST),
            ],
        )
        .with_title("Videos"),
        MenuNode::branch(
            "/admin/document",
            vec![
                entry("/admin/document/list", "Documents", document::LIST),
                entry("/admin/document/audit", "Review queue", document::AUDIT),
            ],
        )
        .with_title("Documents"),
        entry("/admin/dictionary/list", "Dictionary", dictionary::LIST),
        MenuNode::branch(
            "/admin/points",
            vec![
                entry("/admin/points/list", "Point ledger", points::LIST),
                entry("/admin/points/rules", "Point rules", points::RULE_LIST),
            ],
        )
        .with_title("Points"),
        MenuNode::branch(
            "/admin/content",
            vec![
                entry("/admin/content/list", "Articles", content::LIST),
                entry("/admin/content/banner", "Banners", content::BANNER_LIST),
                entry("/admin/content/notice", "Notices", content::NOTICE_LIST),
            ],
        )
        .with_title("Content"),
        MenuNode::branch(
            "/admin/system",
            vec![
                entry("/admin/system/settings", "Settings", system::SETTINGS),
                entry("/admin/system/role", "Roles", system::ROLE_LIST),
                entry("/admin/system/log", "Audit log", system::LOG_LIST),
            ],
        )
        .with_title("System"),
    ]
}
