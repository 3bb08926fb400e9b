//! Minimal HTML page rendering
//!
//! Pages are assembled with `format!` rather than a templating engine;
//! all user-sourced text passes through `escape` first.

use crate::store::WishlistItem;

/// Escape text for interpolation into HTML bodies and attribute values
fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{} | Wishlist</title></head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

/// The item listing for the logged-in user
pub fn index(username: &str, items: &[WishlistItem]) -> String {
    let mut rows = String::new();
    for item in items {
        rows.push_str(&format!(
            "<li>{} &ndash; {} <a href=\"/update/{}\">edit</a> <a href=\"/delete/{}\">delete</a></li>\n",
            escape(&item.name),
            escape(&item.description),
            item.id.0,
            item.id.0
        ));
    }

    let body = format!(
        "<h1>{}'s wishlist</h1>\n<ul>\n{}</ul>\n<p><a href=\"/add\">Add an item</a> | <a href=\"/logout\">Log out</a></p>",
        escape(username),
        rows
    );
    layout("My wishlist", &body)
}

pub fn register() -> String {
    let body = "<h1>Register</h1>\n\
        <form method=\"post\" action=\"/register\">\n\
        <p><label>Username <input type=\"text\" name=\"username\" required></label></p>\n\
        <p><label>Password <input type=\"password\" name=\"password\" required></label></p>\n\
        <p><label>Confirm password <input type=\"password\" name=\"confirm_password\" required></label></p>\n\
        <p><button type=\"submit\">Register</button></p>\n\
        </form>\n\
        <p><a href=\"/login\">Log in</a></p>";
    layout("Register", body)
}

pub fn login(flash: Option<&str>) -> String {
    let notice = match flash {
        Some(message) => format!("<p class=\"flash\">{}</p>\n", escape(message)),
        None => String::new(),
    };

    let body = format!(
        "<h1>Log in</h1>\n{}\
        <form method=\"post\" action=\"/login\">\n\
        <p><label>Username <input type=\"text\" name=\"username\" required></label></p>\n\
        <p><label>Password <input type=\"password\" name=\"password\" required></label></p>\n\
        <p><button type=\"submit\">Log in</button></p>\n\
        </form>\n\
        <p><a href=\"/register\">Register</a></p>",
        notice
    );
    layout("Log in", &body)
}

pub fn add_item() -> String {
    let body = "<h1>Add an item</h1>\n\
        <form method=\"post\" action=\"/add\">\n\
        <p><label>Name <input type=\"text\" name=\"name\" required></label></p>\n\
        <p><label>Description <input type=\"text\" name=\"description\"></label></p>\n\
        <p><button type=\"submit\">Add</button></p>\n\
        </form>\n\
        <p><a href=\"/\">Back</a></p>";
    layout("Add an item", body)
}

pub fn update_item(item: &WishlistItem) -> String {
    let body = format!(
        "<h1>Update item</h1>\n\
        <form method=\"post\" action=\"/update/{}\">\n\
        <p><label>Name <input type=\"text\" name=\"name\" value=\"{}\" required></label></p>\n\
        <p><label>Description <input type=\"text\" name=\"description\" value=\"{}\"></label></p>\n\
        <p><button type=\"submit\">Save</button></p>\n\
        </form>\n\
        <p><a href=\"/\">Back</a></p>",
        item.id.0,
        escape(&item.name),
        escape(&item.description)
    );
    layout("Update item", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ItemId, UserId};

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<script>\"&'"),
            "&lt;script&gt;&quot;&amp;&#39;"
        );
        assert_eq!(escape("plain text"), "plain text");
    }

    #[test]
    fn test_item_text_is_escaped() {
        let item = WishlistItem {
            id: ItemId(1),
            name: "<b>Bike</b>".to_string(),
            description: "say \"hi\"".to_string(),
            owner_id: UserId(1),
        };

        let page = index("alice", std::slice::from_ref(&item));
        assert!(!page.contains("<b>Bike</b>"));
        assert!(page.contains("&lt;b&gt;Bike&lt;/b&gt;"));

        let form = update_item(&item);
        assert!(form.contains("value=\"say &quot;hi&quot;\""));
    }

    #[test]
    fn test_login_renders_flash_once_supplied() {
        assert!(login(Some("Incorrect password.")).contains("Incorrect password."));
        assert!(!login(None).contains("class=\"flash\""));
    }
}
