//! The fixed set of pull requests the merge-queue demo opens
//!
//! Drink PRs each fill their own `# slot:<id>` marker in the menu file, so
//! any subset merges without git conflicts. One at a time they keep the menu
//! valid; together they blow through the item limit and the average price
//! ceiling, which is what the merge queue is there to catch.
//!
//! Stylesheet and template PRs patch shared anchors, and the four template
//! feature PRs deliberately collide with each other.

mod drinks;

pub use drinks::{DRINKS, Drink};

use crate::patch::FileChange;

/// Menu data file, relative to the repository root
pub const MENU_PATH: &str = "data/menu.toml";
/// Stylesheet, relative to the repository root
pub const STYLESHEET_PATH: &str = "static/styles.css";
/// Page template, relative to the repository root
pub const TEMPLATE_PATH: &str = "templates/index.html";

const CSS_HEADER: &str = "/* Merge Queue Café base styles */";

const CSS_BODY_FONT: &str = "body {\n    font-family: Georgia, \"Times New Roman\", serif;";

const CSS_MENU_GRID: &str = ".menu-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(250px, 1fr));
    gap: 1.5rem;
}";

const CSS_MENU_CARD: &str = ".menu-card {
    background: #fff;
    border: 1px solid #e0d6cc;
    border-radius: 8px;
    padding: 1.5rem;
}";

const CSS_FOOTER: &str = "footer {";

const HTML_STYLESHEET_LINK: &str = "    <link rel=\"stylesheet\" href=\"/static/styles.css\">";

const HTML_MENU_HEADING: &str = "        <section class=\"menu\">\n            <h2>Our Menu</h2>";

const HTML_BODY_END: &str = "</footer>\n</body>";

const HTML_PRICE_LINE: &str = "                    <p class=\"price\">${{ item.price }}</p>";

/// A pull request the demo opens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoPr {
    /// Head branch name
    pub branch: String,
    /// PR title, also used as the commit message
    pub title: String,
    /// PR body (markdown)
    pub body: String,
    /// File changes committed on the branch, applied in order
    pub changes: Vec<FileChange>,
}

impl DemoPr {
    fn new(branch: &str, title: &str, body: &str, changes: Vec<FileChange>) -> Self {
        Self {
            branch: branch.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            changes,
        }
    }
}

/// All demo PRs in creation order
pub fn demo_prs() -> Vec<DemoPr> {
    let mut prs: Vec<DemoPr> = DRINKS.iter().map(Drink::pull_request).collect();
    prs.extend(style_prs());
    prs.extend(feature_prs());
    prs.extend(infra_prs());
    prs
}

fn style_prs() -> Vec<DemoPr> {
    vec![
        DemoPr::new(
            "dark-mode",
            "Add dark mode support",
            "Adds a `prefers-color-scheme: dark` media query for dark mode users.",
            vec![FileChange::patch(
                STYLESHEET_PATH,
                CSS_HEADER,
                "/* Merge Queue Café base styles */

@media (prefers-color-scheme: dark) {
    body {
        background-color: #1a1a2e;
        color: #e0d6cc;
    }
    header {
        background-color: #16213e;
    }
    .menu-card {
        background: #0f3460;
        border-color: #1a1a2e;
    }
    .price {
        color: #e9b872;
    }
}",
            )],
        ),
        DemoPr::new(
            "responsive-layout",
            "Make layout mobile-responsive",
            "Adds responsive breakpoints so the menu looks great on phones and tablets.",
            vec![FileChange::patch(
                STYLESHEET_PATH,
                CSS_MENU_GRID,
                ".menu-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(250px, 1fr));
    gap: 1.5rem;
}

@media (max-width: 600px) {
    .menu-grid {
        grid-template-columns: 1fr;
        gap: 1rem;
    }
    header h1 {
        font-size: 1.8rem;
    }
    main {
        padding: 0 0.5rem;
    }
}",
            )],
        ),
        DemoPr::new(
            "fancy-fonts",
            "Switch to Google Fonts",
            "Uses **Playfair Display** for headings and **Source Sans Pro** for body text.",
            vec![
                FileChange::patch(
                    STYLESHEET_PATH,
                    CSS_BODY_FONT,
                    "body {\n    font-family: \"Source Sans Pro\", Georgia, \"Times New Roman\", serif;",
                ),
                FileChange::patch(
                    TEMPLATE_PATH,
                    HTML_STYLESHEET_LINK,
                    "    <link href=\"https://fonts.googleapis.com/css2?family=Playfair+Display:wght@700&family=Source+Sans+Pro&display=swap\" rel=\"stylesheet\">
    <link rel=\"stylesheet\" href=\"/static/styles.css\">",
                ),
            ],
        ),
        DemoPr::new(
            "menu-card-redesign",
            "Redesign menu item cards",
            "Adds hover effects and a subtle shadow to menu cards for a more polished look.",
            vec![FileChange::patch(
                STYLESHEET_PATH,
                CSS_MENU_CARD,
                ".menu-card {
    background: #fff;
    border: 1px solid #e0d6cc;
    border-radius: 12px;
    padding: 1.5rem;
    box-shadow: 0 2px 8px rgba(59, 47, 47, 0.08);
    transition: transform 0.2s ease, box-shadow 0.2s ease;
}

.menu-card:hover {
    transform: translateY(-4px);
    box-shadow: 0 6px 20px rgba(59, 47, 47, 0.15);
}",
            )],
        ),
    ]
}

/// Insert `controls` under the menu heading and `script` before `</body>`
fn template_feature(controls: &str, script: &str) -> Vec<FileChange> {
    vec![
        FileChange::patch(
            TEMPLATE_PATH,
            HTML_MENU_HEADING,
            &format!("{HTML_MENU_HEADING}\n{controls}"),
        ),
        FileChange::patch(
            TEMPLATE_PATH,
            HTML_BODY_END,
            &format!("</footer>\n    <script>\n{script}\n    </script>\n</body>"),
        ),
    ]
}

fn feature_prs() -> Vec<DemoPr> {
    vec![
        DemoPr::new(
            "search-bar",
            "Add search/filter bar",
            "Adds a text input that filters menu items in real time using JavaScript.",
            template_feature(
                "            <div class=\"search-container\">
                <input type=\"text\" id=\"search\" placeholder=\"Search the menu...\" onkeyup=\"filterMenu()\">
            </div>",
                "    function filterMenu() {
        const q = document.getElementById('search').value.toLowerCase();
        document.querySelectorAll('.menu-card').forEach(card => {
            const text = card.textContent.toLowerCase();
            card.style.display = text.includes(q) ? '' : 'none';
        });
    }",
            ),
        ),
        DemoPr::new(
            "category-tabs",
            "Add drink category tabs",
            "Adds clickable category tabs so users can filter by coffee, tea, etc.",
            template_feature(
                "            <div class=\"category-tabs\">
                <button class=\"tab active\" onclick=\"filterCategory(event, 'all')\">All</button>
                {% for cat in categories %}
                <button class=\"tab\" onclick=\"filterCategory(event, '{{ cat }}')\">{{ cat|capitalize }}</button>
                {% endfor %}
            </div>",
                "    function filterCategory(event, cat) {
        document.querySelectorAll('.tab').forEach(t => t.classList.remove('active'));
        event.target.classList.add('active');
        document.querySelectorAll('.menu-card').forEach(card => {
            const cardCat = card.querySelector('.category').textContent.toLowerCase();
            card.style.display = (cat === 'all' || cardCat === cat) ? '' : 'none';
        });
    }",
            ),
        ),
        DemoPr::new(
            "price-sort",
            "Add sort-by-price button",
            "Adds a button to sort menu items by price (ascending).",
            template_feature(
                "            <div class=\"sort-controls\">
                <button onclick=\"sortByPrice()\">Sort by Price ↑</button>
            </div>",
                "    function sortByPrice() {
        const grid = document.querySelector('.menu-grid');
        const cards = Array.from(grid.querySelectorAll('.menu-card'));
        cards.sort((a, b) => {
            const pa = parseFloat(a.querySelector('.price').textContent.replace('$', ''));
            const pb = parseFloat(b.querySelector('.price').textContent.replace('$', ''));
            return pa - pb;
        });
        cards.forEach(card => grid.appendChild(card));
    }",
            ),
        ),
        DemoPr::new(
            "favorites-feature",
            "Add favorite heart button",
            "Adds a ❤️ toggle button to each menu card so users can favorite drinks.",
            vec![
                FileChange::patch(
                    TEMPLATE_PATH,
                    HTML_PRICE_LINE,
                    &format!(
                        "{HTML_PRICE_LINE}\n                    <button class=\"fav-btn\" onclick=\"this.classList.toggle('liked')\">♡</button>"
                    ),
                ),
                FileChange::patch(
                    STYLESHEET_PATH,
                    CSS_FOOTER,
                    ".fav-btn {
    background: none;
    border: none;
    font-size: 1.5rem;
    cursor: pointer;
    color: #ccc;
    transition: color 0.2s;
}

.fav-btn.liked {
    color: #e74c3c;
}

.fav-btn:hover {
    color: #e74c3c;
}

footer {",
                ),
            ],
        ),
    ]
}

fn infra_prs() -> Vec<DemoPr> {
    vec![
        DemoPr::new(
            "add-rustfmt-config",
            "Add rustfmt configuration",
            "Adds a `rustfmt.toml` so formatting is consistent across editors.",
            vec![FileChange::create(
                "rustfmt.toml",
                "edition = \"2024\"
max_width = 100
use_field_init_shorthand = true",
            )],
        ),
        DemoPr::new(
            "add-editorconfig",
            "Add .editorconfig",
            "Adds an `.editorconfig` with indentation and line-ending defaults.",
            vec![FileChange::create(
                ".editorconfig",
                "root = true

[*]
charset = utf-8
end_of_line = lf
insert_final_newline = true
indent_style = space
indent_size = 4

[*.{html,css,yml}]
indent_size = 2",
            )],
        ),
    ]
}
