use maud::{Markup, Render, html};

pub const INPUT_CLASSES: &str = "shadow-sm appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:ring bg-white border-slate-300";

/// A table with a fixed set of columns whose cells truncate and show the full value on hover.
/// `actions` renders the trailing column for each row.
pub fn render_table<const N: usize>(
    titles: [&str; N],
    items: Vec<[String; N]>,
    actions: impl Fn(&[String; N]) -> Markup,
    empty_message: &str,
) -> Markup {
    html! {
        table class="w-full table-fixed text-sm border-collapse" {
            thead class="bg-slate-200" {
                tr {
                    @for title in titles {
                        th class="px-2 py-1.5 border text-left font-semibold truncate" {(title)}
                    }
                    th class="px-2 py-1.5 border w-20" {"Actions"}
                }
            }
            tbody id="students_tbody" {
                @if items.is_empty() {
                    (placeholder_row(N + 1, empty_message))
                }
                @for row in &items {
                    tr class="hover:bg-slate-100" {
                        @for col in row {
                            td class="px-2 py-1.5 border truncate" title=(col) {(col)}
                        }
                        td class="px-2 py-1.5 border text-center" {(actions(row))}
                    }
                }
            }
        }
    }
}

pub fn placeholder_row(colspan: usize, message: &str) -> Markup {
    html! {
        tr {
            td colspan=(colspan) class="px-3 py-4 text-center text-slate-500" {(message)}
        }
    }
}

pub fn title(s: impl Render) -> Markup {
    html! {
        h1 class="text-2xl font-semibold mb-4" {(s)}
    }
}

pub fn form_element(id: &'static str, label: &'static str, input: Markup) -> Markup {
    html! {
        div class="mb-3" {
            label for=(id) class="block text-sm font-bold mb-1 text-slate-600" {(label)}
            (input)
        }
    }
}

pub fn simple_form_element(
    id: &'static str,
    label: &'static str,
    input_type: Option<&'static str>,
    value: &str,
) -> Markup {
    form_element(
        id,
        label,
        html! {
            input required type=(input_type.unwrap_or("text")) id=(id) name=(id) value=(value) class=(INPUT_CLASSES) {}
        },
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Failure,
}

/// A notification swapped into `#toast` out-of-band, which removes itself after a few seconds.
pub fn toast(kind: ToastKind, message: impl Render) -> Markup {
    let colours = match kind {
        ToastKind::Success => "bg-green-100 border-green-400 text-green-700",
        ToastKind::Failure => "bg-red-100 border-red-400 text-red-700",
    };

    html! {
        div hx-swap-oob="beforeend:#toast" {
            div class={"border px-4 py-3 rounded shadow " (colours)} role="alert" "hx-on::load"="setTimeout(() => this.remove(), 3000)" {
                (message)
            }
        }
    }
}
