//! ARIA Support
//!
//! ARIA roles, implicit roles of HTML elements, and role categories used by
//! the name rules.

use crate::view::DomView;
use fos_dom::NodeId;

/// ARIA role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AriaRole {
    // Landmark roles
    Banner,
    Complementary,
    ContentInfo,
    Form,
    Main,
    Navigation,
    Region,
    Search,

    // Widget roles
    Alert,
    AlertDialog,
    Button,
    Checkbox,
    Combobox,
    Dialog,
    Grid,
    GridCell,
    Link,
    Listbox,
    Log,
    Marquee,
    Menu,
    MenuBar,
    MenuItem,
    MenuItemCheckbox,
    MenuItemRadio,
    Option,
    ProgressBar,
    Radio,
    RadioGroup,
    ScrollBar,
    SearchBox,
    Slider,
    SpinButton,
    Status,
    Switch,
    Tab,
    TabList,
    TabPanel,
    TextBox,
    Timer,
    ToolTip,
    Tree,
    TreeGrid,
    TreeItem,

    // Document structure
    Application,
    Article,
    BlockQuote,
    Caption,
    Cell,
    Code,
    ColumnHeader,
    Definition,
    Deletion,
    Directory,
    Document,
    Emphasis,
    Feed,
    Figure,
    Generic,
    Group,
    Heading,
    Img,
    Insertion,
    List,
    ListItem,
    Mark,
    Math,
    Meter,
    Note,
    Paragraph,
    Presentation,
    Row,
    RowGroup,
    RowHeader,
    Separator,
    Strong,
    Subscript,
    Superscript,
    Table,
    Term,
    Time,
    Toolbar,
}

impl AriaRole {
    /// Parse a single role token
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_lowercase().as_str() {
            "banner" => Self::Banner,
            "complementary" => Self::Complementary,
            "contentinfo" => Self::ContentInfo,
            "form" => Self::Form,
            "main" => Self::Main,
            "navigation" => Self::Navigation,
            "region" => Self::Region,
            "search" => Self::Search,
            "alert" => Self::Alert,
            "alertdialog" => Self::AlertDialog,
            "button" => Self::Button,
            "checkbox" => Self::Checkbox,
            "combobox" => Self::Combobox,
            "dialog" => Self::Dialog,
            "grid" => Self::Grid,
            "gridcell" => Self::GridCell,
            "link" => Self::Link,
            "listbox" => Self::Listbox,
            "log" => Self::Log,
            "marquee" => Self::Marquee,
            "menu" => Self::Menu,
            "menubar" => Self::MenuBar,
            "menuitem" => Self::MenuItem,
            "menuitemcheckbox" => Self::MenuItemCheckbox,
            "menuitemradio" => Self::MenuItemRadio,
            "option" => Self::Option,
            "progressbar" => Self::ProgressBar,
            "radio" => Self::Radio,
            "radiogroup" => Self::RadioGroup,
            "scrollbar" => Self::ScrollBar,
            "searchbox" => Self::SearchBox,
            "slider" => Self::Slider,
            "spinbutton" => Self::SpinButton,
            "status" => Self::Status,
            "switch" => Self::Switch,
            "tab" => Self::Tab,
            "tablist" => Self::TabList,
            "tabpanel" => Self::TabPanel,
            "textbox" => Self::TextBox,
            "timer" => Self::Timer,
            "tooltip" => Self::ToolTip,
            "tree" => Self::Tree,
            "treegrid" => Self::TreeGrid,
            "treeitem" => Self::TreeItem,
            "application" => Self::Application,
            "article" => Self::Article,
            "blockquote" => Self::BlockQuote,
            "caption" => Self::Caption,
            "cell" => Self::Cell,
            "code" => Self::Code,
            "columnheader" => Self::ColumnHeader,
            "definition" => Self::Definition,
            "deletion" => Self::Deletion,
            "directory" => Self::Directory,
            "document" => Self::Document,
            "emphasis" => Self::Emphasis,
            "feed" => Self::Feed,
            "figure" => Self::Figure,
            "generic" => Self::Generic,
            "group" => Self::Group,
            "heading" => Self::Heading,
            "img" => Self::Img,
            "insertion" => Self::Insertion,
            "list" => Self::List,
            "listitem" => Self::ListItem,
            "mark" => Self::Mark,
            "math" => Self::Math,
            "meter" => Self::Meter,
            "note" => Self::Note,
            "paragraph" => Self::Paragraph,
            "none" | "presentation" => Self::Presentation,
            "row" => Self::Row,
            "rowgroup" => Self::RowGroup,
            "rowheader" => Self::RowHeader,
            "separator" => Self::Separator,
            "strong" => Self::Strong,
            "subscript" => Self::Subscript,
            "superscript" => Self::Superscript,
            "table" => Self::Table,
            "term" => Self::Term,
            "time" => Self::Time,
            "toolbar" => Self::Toolbar,
            _ => return None,
        })
    }

    /// First valid token of a space-separated role attribute
    pub fn from_attribute(value: &str) -> Option<Self> {
        value.split_ascii_whitespace().find_map(Self::parse)
    }

    /// Check if role is widget
    pub fn is_widget(&self) -> bool {
        matches!(self,
            Self::Button | Self::Checkbox | Self::Combobox | Self::Link | Self::Menu |
            Self::MenuItem | Self::MenuItemCheckbox | Self::MenuItemRadio | Self::Option |
            Self::Radio | Self::SearchBox | Self::Slider | Self::SpinButton |
            Self::Switch | Self::Tab | Self::TextBox | Self::TreeItem
        )
    }

    /// Check if role is landmark
    pub fn is_landmark(&self) -> bool {
        matches!(self,
            Self::Banner | Self::Complementary | Self::ContentInfo |
            Self::Form | Self::Main | Self::Navigation | Self::Region | Self::Search
        )
    }

    /// Roles whose accessible name may come from their content
    pub fn allows_name_from_content(&self) -> bool {
        matches!(self,
            Self::Button | Self::Cell | Self::Checkbox | Self::ColumnHeader |
            Self::GridCell | Self::Heading | Self::Link | Self::MenuItem |
            Self::MenuItemCheckbox | Self::MenuItemRadio | Self::Option |
            Self::Radio | Self::Row | Self::RowHeader | Self::Switch |
            Self::Tab | Self::ToolTip | Self::TreeItem
        )
    }
}

/// Role an HTML element has without a role attribute
pub fn implicit_role(dom: &dyn DomView, node: NodeId) -> Option<AriaRole> {
    let tag = dom.tag_name(node)?;
    Some(match tag {
        "a" | "area" if dom.attribute(node, "href").is_some() => AriaRole::Link,
        "article" => AriaRole::Article,
        "aside" => AriaRole::Complementary,
        "button" => AriaRole::Button,
        "dialog" => AriaRole::Dialog,
        "form" => AriaRole::Form,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => AriaRole::Heading,
        "hr" => AriaRole::Separator,
        "img" => match dom.attribute(node, "alt") {
            Some("") => AriaRole::Presentation,
            _ => AriaRole::Img,
        },
        "input" => return input_role(dom.attribute(node, "type")),
        "li" => AriaRole::ListItem,
        "main" => AriaRole::Main,
        "nav" => AriaRole::Navigation,
        "ol" | "ul" => AriaRole::List,
        "option" => AriaRole::Option,
        "progress" => AriaRole::ProgressBar,
        "select" => AriaRole::Combobox,
        "summary" => AriaRole::Button,
        "table" => AriaRole::Table,
        "td" => AriaRole::Cell,
        "textarea" => AriaRole::TextBox,
        "th" => AriaRole::ColumnHeader,
        "tr" => AriaRole::Row,
        _ => return None,
    })
}

fn input_role(input_type: Option<&str>) -> Option<AriaRole> {
    let input_type = input_type.map(str::to_ascii_lowercase);
    Some(match input_type.as_deref().unwrap_or("text") {
        "button" | "image" | "reset" | "submit" => AriaRole::Button,
        "checkbox" => AriaRole::Checkbox,
        "radio" => AriaRole::Radio,
        "range" => AriaRole::Slider,
        "number" => AriaRole::SpinButton,
        "search" => AriaRole::SearchBox,
        "email" | "tel" | "text" | "url" => AriaRole::TextBox,
        _ => return None,
    })
}

/// Explicit role if valid, else the implicit one
pub fn role_of(dom: &dyn DomView, node: NodeId) -> Option<AriaRole> {
    dom.attribute(node, "role")
        .and_then(AriaRole::from_attribute)
        .or_else(|| implicit_role(dom, node))
}
