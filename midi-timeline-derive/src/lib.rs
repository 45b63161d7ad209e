use convert_case::{Case, Casing};
use proc_macro::TokenStream;
use proc_macro2::{Ident, Span, TokenStream as TokenStream2};
use proc_macro_error::{abort_call_site, proc_macro_error, ResultExt};
use quote::quote;
use syn::{self, ext::IdentExt, Attribute, DataEnum, DataStruct, DeriveInput, Fields, Variant};

fn has_attr(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|a| match a.path.get_ident() {
        None => false,
        Some(ident) => ident.unraw().to_string().eq(name),
    })
}

fn find_attr_fields<'a>(fields: &'a Fields, name: &str) -> Option<&'a Ident> {
    let fields = fields
        .iter()
        .filter(|f| has_attr(&f.attrs, name))
        .collect::<Vec<_>>();
    match fields.len() {
        0 => None,
        1 => fields[0].ident.as_ref(),
        _ => abort_call_site!(format!("Multiple fields found with attribute #[{name}]")),
    }
}

#[proc_macro_derive(MIDIEvent, attributes(note, channel))]
#[proc_macro_error]
pub fn midi_event(input: TokenStream) -> TokenStream {
    let ast: DeriveInput = syn::parse(input).expect_or_abort("Couldn't parse for MIDIEvent");

    let name = &ast.ident;
    let generics = &ast.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    if let syn::Data::Struct(DataStruct { ref fields, .. }) = ast.data {
        let note_field = find_attr_fields(fields, "note");
        let channel_field = find_attr_fields(fields, "channel");

        if note_field.is_some() && channel_field.is_none() {
            abort_call_site!(
                "Note events must also have a channel (use #[channel] along with #[note])!"
            );
        }

        let mut generated_impl = Vec::new();
        let mut generated_trait_impl = Vec::new();

        match note_field {
            None => {
                generated_trait_impl.push(quote! {
                    #[inline(always)]
                    fn note(&self) -> Option<u8> {
                        None
                    }

                    #[inline(always)]
                    fn note_mut(&mut self) -> Option<&mut u8> {
                        None
                    }
                });
            }
            Some(ident) => {
                generated_impl.push(quote! {
                    #[inline(always)]
                    pub fn note(&self) -> u8 {
                        self.#ident
                    }
                });

                generated_trait_impl.push(quote! {
                    #[inline(always)]
                    fn note(&self) -> Option<u8> {
                        Some(self.#ident)
                    }

                    #[inline(always)]
                    fn note_mut(&mut self) -> Option<&mut u8> {
                        Some(&mut self.#ident)
                    }
                });
            }
        }

        match channel_field {
            None => {
                generated_trait_impl.push(quote! {
                    #[inline(always)]
                    fn channel(&self) -> Option<u8> {
                        None
                    }

                    #[inline(always)]
                    fn channel_mut(&mut self) -> Option<&mut u8> {
                        None
                    }
                });
            }
            Some(ident) => {
                generated_impl.push(quote! {
                    #[inline(always)]
                    pub fn channel(&self) -> u8 {
                        self.#ident
                    }
                });

                generated_trait_impl.push(quote! {
                    #[inline(always)]
                    fn channel(&self) -> Option<u8> {
                        Some(self.#ident)
                    }

                    #[inline(always)]
                    fn channel_mut(&mut self) -> Option<&mut u8> {
                        Some(&mut self.#ident)
                    }
                });
            }
        }

        let gen = quote! {
            impl #impl_generics MIDIEvent for #name #ty_generics #where_clause {
                #(#generated_trait_impl)*
            }

            impl #impl_generics #name #ty_generics #where_clause {
                #(#generated_impl)*
            }
        };

        gen.into()
    } else {
        abort_call_site!("#[derive(MIDIEvent)] is only defined for structs, not for enums!");
    }
}

fn event_enum_from_struct(name: &Ident) -> Ident {
    let event_name = name.unraw().to_string();
    let event_name = match event_name.strip_suffix("Event") {
        Some(stripped) => stripped.to_string(),
        None => abort_call_site!("Event payload structs must be named `<Variant>Event`"),
    };
    Ident::new(&event_name, name.span())
}

fn event_struct_from_enum(name: &Ident) -> Ident {
    let event_name = name.unraw().to_string();
    let event_name = event_name + "Event";
    Ident::new(&event_name[..], name.span())
}

#[proc_macro_derive(NewEvent)]
#[proc_macro_error]
pub fn create_new_event(input: TokenStream) -> TokenStream {
    let ast: DeriveInput = syn::parse(input).expect_or_abort("Couldn't parse for NewEvent");

    let name = &ast.ident;
    let generics = &ast.generics;
    let (impl_generics, _ty_generics, where_clause) = generics.split_for_impl();

    if let syn::Data::Struct(DataStruct { ref fields, .. }) = ast.data {
        let mut new_args = Vec::new();
        let mut assign = Vec::new();

        let event_ident = event_enum_from_struct(name);
        let snake_case = name.unraw().to_string()[..].to_case(Case::Snake);
        let new_ident = Ident::new(&format!("new_{snake_case}")[..], Span::call_site());
        let new_delta_ident = Ident::new(&format!("new_delta_{snake_case}")[..], Span::call_site());

        let doc_str = &format!("Creates a new `{name}`.");
        let doc_str2 = &format!(
            "Creates a new [`{name}`](crate::events::{name}) wrapped in [`Event::{ident}`](crate::events::Event::{ident}).",
            ident = event_ident.unraw(),
        );
        let doc_str2_delta = &format!(
            "Creates a new [`{name}`](crate::events::{name}) wrapped in [`Event::{ident}`](crate::events::Event::{ident}), paired with a delta time.",
            ident = event_ident.unraw(),
        );

        for field in fields.iter() {
            if let Some(ident) = &field.ident {
                let ty = &field.ty;
                new_args.push(quote! {#ident: #ty,});
                assign.push(quote! {#ident,});
            }
        }

        let gen = quote! {
            impl #impl_generics #name #where_clause {
                #[doc=#doc_str]
                #[inline(always)]
                pub fn new(#(#new_args)*) -> Self {
                    Self {
                        #(#assign)*
                    }
                }
            }

            impl Event {
                #[doc=#doc_str2]
                #[inline(always)]
                pub fn #new_ident(#(#new_args)*) -> Event {
                    (#name :: new(#(#assign)*)).as_event()
                }

                #[doc=#doc_str2_delta]
                #[inline(always)]
                pub fn #new_delta_ident<D: MIDINum>(delta: D, #(#new_args)*) -> Delta<D, Event> {
                    Delta::new(delta, (#name :: new(#(#assign)*)).as_event())
                }
            }
        };

        gen.into()
    } else {
        abort_call_site!("#[derive(NewEvent)] is only defined for structs, not for enums!");
    }
}

#[proc_macro_derive(EventImpl, attributes(channel, note))]
#[proc_macro_error]
pub fn event_impl(input: TokenStream) -> TokenStream {
    let ast: DeriveInput = syn::parse(input).expect_or_abort("Couldn't parse for EventImpl");

    let name = &ast.ident;
    let generics = &ast.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    if let syn::Data::Enum(DataEnum { variants, .. }) = ast.data {
        fn variant_has_attr(v: &Variant, name: &str) -> bool {
            has_attr(&v.attrs, name)
        }

        fn make_match_line(ident: &Ident, res: TokenStream2) -> TokenStream2 {
            quote! {
                Event::#ident(event) => #res,
            }
        }

        // Variants without the attribute answer `None` without touching the payload.
        fn create_match(
            variants: &[&Variant],
            attr: &str,
            res: TokenStream2,
        ) -> TokenStream2 {
            let lines = variants
                .iter()
                .map(|v| {
                    let ident = &v.ident;
                    if variant_has_attr(v, attr) {
                        make_match_line(ident, quote! { Some(#res) })
                    } else {
                        quote! { Event::#ident(_) => None, }
                    }
                })
                .collect::<Vec<_>>();
            quote! {
                match self {
                    #(#lines)*
                }
            }
        }

        let variants = variants.iter().collect::<Vec<_>>();

        let note = create_match(&variants, "note", quote! { event.note });
        let note_mut = create_match(&variants, "note", quote! { &mut event.note });
        let channel = create_match(&variants, "channel", quote! { event.channel });
        let channel_mut = create_match(&variants, "channel", quote! { &mut event.channel });

        let mut event_wrap_impl = Vec::new();
        for variant in variants.iter() {
            let ident = &variant.ident;
            let struct_ident = event_struct_from_enum(ident);
            let doc_str = &format!(
                "Wraps the `{}` in a `Event::{}`.",
                struct_ident.unraw(),
                ident.unraw()
            );
            event_wrap_impl.push(quote! {
                impl #struct_ident {
                    #[doc=#doc_str]
                    #[inline(always)]
                    pub fn as_event(self) -> #name #ty_generics {
                        #name::#ident(self)
                    }
                }

                impl From<#struct_ident> for #name #ty_generics {
                    #[inline(always)]
                    fn from(event: #struct_ident) -> Self {
                        #name::#ident(event)
                    }
                }
            });
        }

        let gen = quote! {
            impl #impl_generics MIDIEvent for #name #ty_generics #where_clause {
                #[inline(always)]
                fn note(&self) -> Option<u8> {
                    #note
                }

                #[inline(always)]
                fn note_mut(&mut self) -> Option<&mut u8> {
                    #note_mut
                }

                #[inline(always)]
                fn channel(&self) -> Option<u8> {
                    #channel
                }

                #[inline(always)]
                fn channel_mut(&mut self) -> Option<&mut u8> {
                    #channel_mut
                }
            }

            #(#event_wrap_impl)*
        };

        gen.into()
    } else {
        abort_call_site!("#[derive(EventImpl)] is only defined for enums, not for structs!");
    }
}
