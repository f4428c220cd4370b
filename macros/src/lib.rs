use std::collections::HashSet;

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::parse::{Parse, ParseStream};
use syn::spanned::Spanned;
use syn::{parse_macro_input, Attribute, FnArg, ImplItem, ImplItemFn, ItemImpl, LitInt, LitStr, Meta, Token, Type};

const ROUTE_METHODS: &[&str] = &["get", "post", "put", "delete", "patch"];

/// Generates a `launchpad_core::controller::Controller` impl and an OpenAPI
/// struct from an impl block whose associated functions carry route
/// attributes.
///
/// Usage:
/// ```rust,ignore
/// struct HealthController;
///
/// #[controller(state = AppState)]
/// impl HealthController {
///     #[get("/health")]
///     #[utoipa_response(status = 200, body = HealthResponse, description = "Service is alive")]
///     async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
///         // ...
///     }
/// }
/// ```
///
/// This expands to `impl Controller<AppState> for HealthController` whose
/// `router()` registers every annotated function, plus a
/// `HealthControllerApi` struct deriving `utoipa::OpenApi` that lists the
/// documented paths. Without `state = ...` the router state is `()`.
#[proc_macro_attribute]
pub fn controller(args: TokenStream, input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(args as ControllerArgs);
    let impl_block = parse_macro_input!(input as ItemImpl);

    match expand_controller(args, impl_block) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

struct ControllerArgs {
    state: Option<Type>,
}

impl Parse for ControllerArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.is_empty() {
            return Ok(Self { state: None });
        }

        let key: syn::Ident = input.parse()?;
        if key != "state" {
            return Err(syn::Error::new(key.span(), format!("Unknown argument: {key}")));
        }
        input.parse::<Token![=]>()?;
        let state = input.parse()?;

        if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
        }

        Ok(Self { state: Some(state) })
    }
}

struct Route {
    method: String,
    path: LitStr,
}

fn expand_controller(args: ControllerArgs, impl_block: ItemImpl) -> syn::Result<proc_macro2::TokenStream> {
    let self_ty = &impl_block.self_ty;
    let struct_name = match &**self_ty {
        Type::Path(type_path) => type_path.path.segments.last().map(|s| s.ident.clone()),
        _ => None,
    }
    .ok_or_else(|| syn::Error::new(self_ty.span(), "Expected a struct type"))?;

    let state = match &args.state {
        Some(ty) => quote! { #ty },
        None => quote! { () },
    };

    let mut registrations = Vec::new();
    let mut doc_functions = Vec::new();
    let mut doc_function_names = Vec::new();
    let mut schemas = Vec::new();
    let mut seen_schemas = HashSet::new();

    for item in &impl_block.items {
        let ImplItem::Fn(method) = item else {
            continue;
        };
        let Some(route) = extract_route_attr(&method.attrs)? else {
            continue;
        };

        if let Some(receiver) = method.sig.inputs.iter().find(|arg| matches!(arg, FnArg::Receiver(_))) {
            return Err(syn::Error::new(
                receiver.span(),
                "route handlers must be associated functions without `self`",
            ));
        }

        let fn_name = &method.sig.ident;
        let axum_method = format_ident!("{}", route.method);
        let path = &route.path;
        registrations.push(quote! {
            .route(#path, axum::routing::#axum_method(<#self_ty>::#fn_name))
        });

        let responses = extract_utoipa_responses(&method.attrs)?;
        for response in &responses {
            let body = &response.body;
            if seen_schemas.insert(quote!(#body).to_string()) {
                schemas.push(response.body.clone());
            }
        }

        let wrapper_name = format_ident!("__utoipa_path_{}", fn_name);
        doc_functions.push(doc_wrapper(&struct_name, method, &wrapper_name, &route, &responses));
        doc_function_names.push(wrapper_name);
    }

    let api_struct_name = format_ident!("{}Api", struct_name);
    let openapi_attr = if schemas.is_empty() {
        quote! {
            #[derive(utoipa::OpenApi)]
            #[openapi(paths(#(#doc_function_names),*))]
        }
    } else {
        quote! {
            #[derive(utoipa::OpenApi)]
            #[openapi(
                paths(#(#doc_function_names),*),
                components(schemas(#(#schemas),*))
            )]
        }
    };

    Ok(quote! {
        #impl_block

        impl launchpad_core::controller::Controller<#state> for #self_ty {
            fn router() -> axum::Router<#state> {
                axum::Router::new()
                    #(#registrations)*
            }
        }

        #(#doc_functions)*

        #openapi_attr
        pub struct #api_struct_name;
    })
}

/// Builds a module-level function mirroring the handler's signature so
/// `#[utoipa::path]` can describe it. The body is never executed.
fn doc_wrapper(
    struct_name: &syn::Ident,
    method: &ImplItemFn,
    wrapper_name: &syn::Ident,
    route: &Route,
    responses: &[UtoipaResponse],
) -> proc_macro2::TokenStream {
    let utoipa_method = format_ident!("{}", route.method);
    let path = &route.path;
    let tag = struct_name.to_string();
    let handler = format!("{}::{}", struct_name, method.sig.ident);

    let fn_async = method.sig.asyncness;
    let fn_inputs = &method.sig.inputs;
    let fn_output = &method.sig.output;
    let fn_generics = &method.sig.generics;
    let fn_where_clause = &method.sig.generics.where_clause;

    let response_tokens = responses.iter().map(|response| {
        let status = response.status;
        let description = &response.description;
        let body = &response.body;
        quote! { (status = #status, description = #description, body = #body) }
    });

    quote! {
        #[doc = concat!("OpenAPI description of ", #handler, ".")]
        #[allow(dead_code, unused_variables)]
        #[utoipa::path(
            #utoipa_method,
            path = #path,
            tag = #tag,
            responses(#(#response_tokens),*)
        )]
        #fn_async fn #wrapper_name #fn_generics(#fn_inputs) #fn_output #fn_where_clause {
            unimplemented!("documentation-only wrapper for {}", #handler)
        }
    }
}

/// Looks for `#[get("/path")]`, `#[launchpad_macros::post("/path")]` and so on.
fn extract_route_attr(attrs: &[Attribute]) -> syn::Result<Option<Route>> {
    for attr in attrs {
        let Some(last_segment) = attr.path().segments.last() else {
            continue;
        };

        let method = last_segment.ident.to_string();
        if !ROUTE_METHODS.contains(&method.as_str()) {
            continue;
        }

        let Meta::List(meta) = &attr.meta else {
            return Err(syn::Error::new(attr.span(), format!("expected #[{method}(\"/path\")]")));
        };
        let path: LitStr = syn::parse2(meta.tokens.clone())?;
        if !path.value().starts_with('/') {
            return Err(syn::Error::new(path.span(), "route paths must start with `/`"));
        }

        return Ok(Some(Route { method, path }));
    }

    Ok(None)
}

struct UtoipaResponse {
    status: u16,
    body: Type,
    description: String,
}

/// Reads every `#[utoipa_response(...)]` on a handler. Two forms:
/// - `#[utoipa_response(Type)]`: status 200, description "Success"
/// - `#[utoipa_response(status = 503, body = Type, description = "...")]`
fn extract_utoipa_responses(attrs: &[Attribute]) -> syn::Result<Vec<UtoipaResponse>> {
    let mut responses = Vec::new();

    for attr in attrs {
        let Some(last_segment) = attr.path().segments.last() else {
            continue;
        };
        if last_segment.ident != "utoipa_response" {
            continue;
        }

        let Meta::List(meta) = &attr.meta else {
            return Err(syn::Error::new(attr.span(), "expected #[utoipa_response(...)]"));
        };

        let response = match syn::parse2::<UtoipaResponseArgs>(meta.tokens.clone()) {
            Ok(args) => UtoipaResponse {
                status: args.status.unwrap_or(200),
                body: args.body,
                description: args.description.unwrap_or_else(|| "Success".to_owned()),
            },
            Err(named_err) => match syn::parse2::<Type>(meta.tokens.clone()) {
                Ok(body) => UtoipaResponse {
                    status: 200,
                    body,
                    description: "Success".to_owned(),
                },
                Err(_) => return Err(named_err),
            },
        };
        responses.push(response);
    }

    Ok(responses)
}

struct UtoipaResponseArgs {
    status: Option<u16>,
    body: Type,
    description: Option<String>,
}

impl Parse for UtoipaResponseArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut status = None;
        let mut body = None;
        let mut description = None;

        while !input.is_empty() {
            let key: syn::Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            if key == "status" {
                let lit: LitInt = input.parse()?;
                status = Some(lit.base10_parse::<u16>()?);
            } else if key == "body" {
                body = Some(input.parse()?);
            } else if key == "description" {
                let lit: LitStr = input.parse()?;
                description = Some(lit.value());
            } else {
                return Err(syn::Error::new(key.span(), format!("Unknown argument: {key}")));
            }

            if !input.is_empty() {
                input.parse::<Token![,]>()?;
            }
        }

        let body = body.ok_or_else(|| input.error("missing `body = Type`"))?;

        Ok(UtoipaResponseArgs {
            status,
            body,
            description,
        })
    }
}

/// Marks a `GET` handler inside a `#[controller]` impl.
#[proc_macro_attribute]
pub fn get(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Marks a `POST` handler inside a `#[controller]` impl.
#[proc_macro_attribute]
pub fn post(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Marks a `PUT` handler inside a `#[controller]` impl.
#[proc_macro_attribute]
pub fn put(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Marks a `DELETE` handler inside a `#[controller]` impl.
#[proc_macro_attribute]
pub fn delete(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Marks a `PATCH` handler inside a `#[controller]` impl.
#[proc_macro_attribute]
pub fn patch(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Documents one response of a handler. Read by `#[controller]`; the
/// attribute itself leaves the function untouched.
#[proc_macro_attribute]
pub fn utoipa_response(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}
