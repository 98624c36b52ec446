use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Expr, Fields, Generics, Ident, LitStr, Member, Type, parse_macro_input,
    parse_quote,
};

/// Derive a `Stringify` implementation for a struct.
///
/// # Attribute syntax
///
/// Exactly one of:
///
/// ```ignore
/// #[stringify(method = "describe")]
/// #[stringify(template = "x={:.2f},y={:.2f}")]
/// ```
///
/// - `method` delegates to an inherent method, which must be
///   `fn describe(&self) -> String`. A method with the same name but any
///   other signature is a compile error.
/// - `template` renders the struct's fields, in declaration order, as the
///   positional arguments of a brace-fmt template. The template is checked
///   when the derive expands: bad syntax, or an index past the last field,
///   is a compile error. A field whose type is a generic parameter (or a
///   reference to one) adds a `Capture` bound on that parameter's type to
///   the impl, so `Wrap<i32>` renders its field as an `Int`.
///
/// # Example
/// ```ignore
/// #[derive(Stringify)]
/// #[stringify(template = "x={:.1f},y={:.1f},motion={}")]
/// struct Track {
///     x: f32,
///     y: f32,
///     motion: String,
/// }
/// ```
#[proc_macro_derive(Stringify, attributes(stringify))]
pub fn derive_stringify(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    match expand_stringify(&input) {
        Ok(output) => output.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_stringify(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let fields = field_members(input)?;
    let args = stringify_args(input)?;
    let mut generics = input.generics.clone();

    let body = match args {
        StringifyArgs::Method(method) => quote! {
            let text: ::std::string::String = Self::#method(self);
            text
        },
        StringifyArgs::Template(template) => {
            check_template(&template, fields.len(), &format!("`{name}` has"), "fields")?;
            add_capture_bounds(&mut generics, input);
            quote! {
                ::brace_fmt::__render_checked(
                    #template,
                    &::brace_fmt::args!(#(self.#fields),*),
                )
            }
        }
    };

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::brace_fmt::Stringify for #name #ty_generics #where_clause {
            fn to_format_string(&self) -> ::std::string::String {
                #body
            }
        }
    })
}

fn field_members(input: &DeriveInput) -> syn::Result<Vec<Member>> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new(
            input.ident.span(),
            "#[derive(Stringify)] only supports structs",
        ));
    };

    let members = match &data.fields {
        Fields::Named(named) => named
            .named
            .iter()
            .filter_map(|f| f.ident.clone())
            .map(Member::Named)
            .collect(),
        Fields::Unnamed(unnamed) => (0..unnamed.unnamed.len())
            .map(|i| Member::Unnamed(syn::Index::from(i)))
            .collect(),
        Fields::Unit => Vec::new(),
    };
    Ok(members)
}

/// Require `Capture` on every field typed by a bare generic parameter.
///
/// Inside the generated impl a parameter is opaque, so without the bound
/// `args!` would pick the unformattable fallback for it.
fn add_capture_bounds(generics: &mut Generics, input: &DeriveInput) {
    let params: Vec<Ident> = input.generics.type_params().map(|p| p.ident.clone()).collect();
    let Data::Struct(data) = &input.data else {
        return;
    };

    let where_clause = generics.make_where_clause();
    for field in &data.fields {
        if is_type_param(&field.ty, &params) {
            let ty = &field.ty;
            where_clause
                .predicates
                .push(parse_quote!(#ty: ::brace_fmt::Capture));
        }
    }
}

fn is_type_param(ty: &Type, params: &[Ident]) -> bool {
    match ty {
        Type::Path(path) if path.qself.is_none() => {
            path.path.get_ident().is_some_and(|ident| params.contains(ident))
        }
        Type::Reference(reference) => is_type_param(&reference.elem, params),
        Type::Paren(paren) => is_type_param(&paren.elem, params),
        Type::Group(group) => is_type_param(&group.elem, params),
        _ => false,
    }
}

/// Format a template with compile-time validation of the template literal.
///
/// Expands to an expression of type `String`. The template must be a string
/// literal; its placeholder syntax is checked during expansion, and an
/// explicit index past the last argument is rejected.
///
/// # Example
/// ```ignore
/// let s = format_checked!("{} has {1:.1f} HP", name, hp);
/// ```
#[proc_macro]
pub fn format_checked(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as FormatCheckedInput);
    let template = &input.template;
    let args = &input.args;

    if let Err(err) = check_template(template, args.len(), "only", "arguments given") {
        return err.to_compile_error().into();
    }

    let output = quote! {
        ::brace_fmt::__render_checked(#template, &::brace_fmt::args!(#(#args),*))
    };
    output.into()
}

/// Parse `template` with brace-fmt's own parser and map failures to
/// compile errors on the literal.
fn check_template(template: &LitStr, arg_count: usize, what: &str, unit: &str) -> syn::Result<()> {
    let source = template.value();
    let parsed = brace_fmt::parse(&source).map_err(|err| {
        let mut message = err.message.clone();
        if let Some(hint) = &err.hint {
            message.push_str(&format!(" ({hint})"));
        }
        syn::Error::new(template.span(), message)
    })?;

    if let Some(max) = parsed.max_index()
        && max >= arg_count
    {
        return Err(syn::Error::new(
            template.span(),
            format!("template refers to argument {max} but {what} {arg_count} {unit}"),
        ));
    }
    Ok(())
}

// -- Attribute arg parsing -----------------------------------------------

enum StringifyArgs {
    Method(Ident),
    Template(LitStr),
}

fn stringify_args(input: &DeriveInput) -> syn::Result<StringifyArgs> {
    let mut found = None;
    for attr in &input.attrs {
        if !attr.path().is_ident("stringify") {
            continue;
        }
        if found.is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate #[stringify(...)] attribute"));
        }
        found = Some(attr.parse_args::<StringifyArgs>()?);
    }

    found.ok_or_else(|| {
        syn::Error::new(
            input.ident.span(),
            "missing #[stringify(method = \"...\")] or #[stringify(template = \"...\")]",
        )
    })
}

impl syn::parse::Parse for StringifyArgs {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let ident: Ident = input.parse()?;
        input.parse::<syn::Token![=]>()?;
        let lit: LitStr = input.parse()?;

        let args = match ident.to_string().as_str() {
            "method" => StringifyArgs::Method(lit.parse()?),
            "template" => StringifyArgs::Template(lit),
            other => {
                return Err(syn::Error::new(
                    ident.span(),
                    format!("unexpected key `{other}`, expected `method` or `template`"),
                ));
            }
        };

        if !input.is_empty() {
            return Err(input.error("expected a single `method` or `template` key"));
        }
        Ok(args)
    }
}

struct FormatCheckedInput {
    template: LitStr,
    args: Vec<Expr>,
}

impl syn::parse::Parse for FormatCheckedInput {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let template: LitStr = input.parse()?;
        let mut args = Vec::new();

        while !input.is_empty() {
            input.parse::<syn::Token![,]>()?;
            if input.is_empty() {
                break;
            }
            args.push(input.parse()?);
        }

        Ok(FormatCheckedInput { template, args })
    }
}
