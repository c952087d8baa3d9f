//! Procedural macros for store-dispatch

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::parse::{Parse, ParseStream};
use syn::{braced, parse_macro_input, Ident, Token, Visibility};

/// One entry of an `action_paths!` listing: a leaf action or a namespace.
enum Entry {
    Leaf(Ident),
    Namespace(Ident, Vec<Entry>),
}

/// The full `action_paths!` input: `vis mod name { entries }`.
struct PathsInput {
    vis: Visibility,
    name: Ident,
    entries: Vec<Entry>,
}

impl Parse for PathsInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let vis: Visibility = input.parse()?;
        input.parse::<Token![mod]>()?;
        let name: Ident = input.parse()?;

        let content;
        braced!(content in input);
        let entries = parse_entries(&content)?;

        Ok(Self { vis, name, entries })
    }
}

fn parse_entries(input: ParseStream) -> syn::Result<Vec<Entry>> {
    let mut entries = Vec::new();

    while !input.is_empty() {
        let name: Ident = input.parse()?;

        if input.peek(syn::token::Brace) {
            let content;
            braced!(content in input);
            entries.push(Entry::Namespace(name, parse_entries(&content)?));
        } else {
            entries.push(Entry::Leaf(name));
        }

        if input.is_empty() {
            break;
        }
        input.parse::<Token![,]>()?;
    }

    Ok(entries)
}

/// Convert an action ident to its SHOUTY_SNAKE constant name.
fn to_const_name(s: &str) -> String {
    let mut result = String::new();
    let mut prev_lower = false;
    for ch in s.chars() {
        if ch.is_uppercase() && prev_lower {
            result.push('_');
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        for upper in ch.to_uppercase() {
            result.push(upper);
        }
    }
    result
}

fn expand_entries(entries: &[Entry], prefix: Option<&str>) -> proc_macro2::TokenStream {
    let mut out = proc_macro2::TokenStream::new();

    for entry in entries {
        match entry {
            Entry::Leaf(name) => {
                let path = match prefix {
                    Some(p) => format!("{p}.{name}"),
                    None => name.to_string(),
                };
                let const_name = format_ident!("{}", to_const_name(&name.to_string()));
                out.extend(quote! {
                    pub const #const_name: &str = #path;
                });
            }
            Entry::Namespace(name, inner) => {
                let absolute = match prefix {
                    Some(p) => format!("{p}.{name}"),
                    None => name.to_string(),
                };
                let inner_items = expand_entries(inner, Some(&absolute));
                out.extend(quote! {
                    pub mod #name {
                        /// Absolute path of this namespace, for `subset` and `prefix`.
                        pub const PREFIX: &str = #absolute;
                        #inner_items
                    }
                });
            }
        }
    }

    out
}

/// Generate a module of `&'static str` action path constants.
///
/// Dispatch sites that name paths through the generated constants cannot
/// misspell them; the runtime resolver stays string-based. Leaves become
/// SHOUTY_SNAKE constants holding their absolute dotted path; namespaces
/// become nested modules, each carrying a `PREFIX` constant with the
/// namespace's own absolute path (handy for `subset` and `prefix`).
///
/// # Example
/// ```
/// use store_dispatch_macros::action_paths;
///
/// action_paths! {
///     pub mod paths {
///         increment,
///         todos {
///             add,
///             remove,
///         },
///     }
/// }
///
/// assert_eq!(paths::INCREMENT, "increment");
/// assert_eq!(paths::todos::ADD, "todos.add");
/// assert_eq!(paths::todos::PREFIX, "todos");
/// ```
#[proc_macro]
pub fn action_paths(input: TokenStream) -> TokenStream {
    let PathsInput { vis, name, entries } = parse_macro_input!(input as PathsInput);

    let items = expand_entries(&entries, None);

    quote! {
        #vis mod #name {
            #items
        }
    }
    .into()
}
