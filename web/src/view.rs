use tasklist_core::TaskList;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>To-Do List</title>
<style>
body { font-family: sans-serif; max-width: 40em; margin: 2em auto; }
ul { list-style: none; padding: 0; }
li { padding: 0.3em 0; }
li.completed .text { text-decoration: line-through; color: #888; }
li a { margin-left: 0.6em; font-size: 0.9em; }
</style>
</head>
<body>
<h1>To-Do List</h1>
<form action="/add" method="post">
<input type="text" name="task" placeholder="New task" autofocus>
<button type="submit">Add</button>
</form>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

/// Renders the full list page: add form, then one row per task in order.
pub fn render_index(tasks: &TaskList) -> String {
    let mut html = String::from(PAGE_HEAD);

    if tasks.is_empty() {
        html.push_str("<p class=\"empty\">No tasks yet.</p>\n");
    } else {
        html.push_str("<ul>\n");
        for task in tasks {
            let (class, toggle_label) = if task.completed {
                ("completed", "Undo")
            } else {
                ("pending", "Done")
            };
            html.push_str(&format!(
                "<li class=\"{class}\"><span class=\"text\">{text}</span>\
                 <a href=\"/toggle/{id}\">{toggle_label}</a>\
                 <a href=\"/delete/{id}\">Delete</a></li>\n",
                text = escape_html(&task.text),
                id = task.id,
            ));
        }
        html.push_str("</ul>\n");
    }

    html.push_str(PAGE_TAIL);
    html
}

pub fn escape_html(input: &str) -> String {
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

#[cfg(test)]
mod tests {
    use super::*;
    use tasklist_core::{create_task, TaskList};

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_render_empty_list() {
        let html = render_index(&TaskList::new());
        assert!(html.contains("No tasks yet."));
        assert!(html.contains(r#"<form action="/add" method="post">"#));
        assert!(!html.contains("<ul>"));
    }

    #[test]
    fn test_render_rows_in_order_with_links() {
        let tasks = TaskList::from_tasks(vec![
            create_task(1, "Buy milk", true),
            create_task(2, "Walk dog", false),
        ]);
        let html = render_index(&tasks);

        let first = html.find("Buy milk").unwrap();
        let second = html.find("Walk dog").unwrap();
        assert!(first < second);

        assert!(html.contains(r#"<li class="completed"><span class="text">Buy milk</span>"#));
        assert!(html.contains(r#"<a href="/toggle/1">Undo</a>"#));
        assert!(html.contains(r#"<a href="/toggle/2">Done</a>"#));
        assert!(html.contains(r#"<a href="/delete/2">Delete</a>"#));
    }
}
