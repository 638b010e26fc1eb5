//! Parsing of XSD sequence, choice and all compositors

use crate::parser::xsd::{Compositor, ComplexType, Sequence, SequenceElement};
use crate::parser::QName;
use quick_xml::events::{BytesStart, Event};
use std::error::Error;

use super::parser::SchemaParser;

impl<B: std::io::BufRead> SchemaParser<B> {
    /// Parse a <sequence> compositor
    ///
    /// Sequences define an ordered list of child elements.
    /// Each element can have minOccurs/maxOccurs attributes to control cardinality.
    ///
    /// Example:
    /// ```xml
    /// <sequence>
    ///   <element name="firstName" type="xs:string"/>
    ///   <element name="lastName" type="xs:string"/>
    ///   <element name="age" type="xs:int" minOccurs="0"/>
    /// </sequence>
    /// ```
    pub(super) fn parse_sequence(&mut self) -> Result<Sequence, Box<dyn Error>> {
        self.parse_compositor_body(b"sequence", Compositor::Sequence)
    }

    /// Parse an <all> compositor
    ///
    /// The <all> compositor is similar to sequence but elements can appear
    /// in any order. Its elements are tagged `Compositor::All` so the
    /// expander can mark the resulting attributes as such.
    ///
    /// Example:
    /// ```xml
    /// <all>
    ///   <element name="country" type="xs:string"/>
    ///   <element name="zipCode" type="xs:string"/>
    /// </all>
    /// ```
    pub(super) fn parse_all(&mut self) -> Result<Sequence, Box<dyn Error>> {
        self.parse_compositor_body(b"all", Compositor::All)
    }

    /// Parse a <choice> compositor
    ///
    /// Only one of the child elements is present in a conforming instance
    /// document, but the expander still flattens them all into the
    /// attribute list, tagged `Compositor::Choice`.
    ///
    /// Example:
    /// ```xml
    /// <choice>
    ///   <element name="email" type="xs:string"/>
    ///   <element name="phone" type="xs:string"/>
    /// </choice>
    /// ```
    pub(super) fn parse_choice(&mut self) -> Result<Sequence, Box<dyn Error>> {
        self.parse_compositor_body(b"choice", Compositor::Choice)
    }

    fn parse_compositor_body(
        &mut self,
        closing_tag: &[u8],
        compositor: Compositor,
    ) -> Result<Sequence, Box<dyn Error>> {
        let mut sequence = Sequence::default();
        let mut buf = Vec::new();
        loop {
            match self.reader.read_event_into(&mut buf)? {
                Event::Start(e) if e.local_name().as_ref() == b"element" => {
                    let mut elem = self.parse_sequence_element(&e, true)?;
                    elem.compositor = compositor;
                    sequence.elements.push(elem);
                }
                Event::Empty(e) if e.local_name().as_ref() == b"element" => {
                    let mut elem = self.parse_sequence_element(&e, false)?;
                    elem.compositor = compositor;
                    sequence.elements.push(elem);
                }
                Event::End(e) if e.local_name().as_ref() == closing_tag => break,
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        Ok(sequence)
    }

    /// Parse an element within a sequence, choice or all compositor
    ///
    /// Extracts:
    /// - name - Element name
    /// - type - Element type (QName)
    /// - minOccurs - Minimum occurrences (default: 1)
    /// - maxOccurs - Maximum occurrences (default: 1, or "unbounded")
    /// - nillable - Whether the element can be nil/null
    ///
    /// # Arguments
    ///
    /// * `e` - The element's start tag
    /// * `should_skip` - If true, this is a Start event; scan its body for
    ///   an inline `complexType` before consuming its end tag.
    pub(super) fn parse_sequence_element(
        &mut self,
        e: &BytesStart,
        should_skip: bool,
    ) -> Result<SequenceElement, Box<dyn Error>> {
        let mut name = None;
        let mut type_name = None;
        let mut min_occurs = 1u32;
        let mut max_occurs = None;
        let mut nillable = false;

        for attr in e.attributes().with_checks(false) {
            let attr = attr?;
            let key = attr.key.as_ref();
            let val = attr.unescape_value()?;

            match key {
                b"name" => name = Some(val.to_string()),
                b"type" => type_name = Some(QName(val.to_string())),
                b"minOccurs" => min_occurs = val.parse().unwrap_or(1),
                b"maxOccurs" => {
                    max_occurs = if val == "unbounded" {
                        Some("unbounded".to_string())
                    } else {
                        Some(val.to_string())
                    }
                }
                b"nillable" => nillable = val == "true",
                _ => {}
            }
        }

        // An element with no `@type` may still carry an inline `complexType`
        // child instead of referencing a global one. Register it under a
        // synthesized, document-unqualified name so the type expander can
        // resolve it exactly like any other complex type reference.
        if should_skip && type_name.is_none() {
            type_name = self.parse_inline_complex_type(name.as_deref().unwrap_or("anonymous"))?;
        } else if should_skip {
            self.skip_element()?;
        }

        Ok(SequenceElement {
            name: name.unwrap_or_default(),
            type_: type_name.unwrap_or_default(),
            min_occurs,
            max_occurs,
            nillable,
            compositor: Compositor::default(),
        })
    }

    /// Scan the body of a sequence/choice/all element for an inline
    /// `<complexType>` child. If found, it is parsed, registered in this
    /// document's `complex_types` under a synthesized name, and that name
    /// is returned so the caller can use it as the element's effective
    /// `@type`. Returns `None` (after consuming the element's end tag) if
    /// no inline complex type is present — a simple- or built-in-typed leaf
    /// with no `@type` at all, which the expander will treat as unresolved.
    fn parse_inline_complex_type(
        &mut self,
        element_name: &str,
    ) -> Result<Option<QName>, Box<dyn Error>> {
        let mut buf = Vec::new();
        let mut synthesized = None;
        loop {
            match self.reader.read_event_into(&mut buf)? {
                Event::Start(e) if e.local_name().as_ref() == b"complexType" => {
                    self.inline_type_counter += 1;
                    let synthetic_name =
                        format!("__inline_{element_name}_{}", self.inline_type_counter);
                    let mut complex_type = ComplexType {
                        name: synthetic_name.clone(),
                        ..Default::default()
                    };
                    self.parse_complex_type_body(&mut complex_type)?;
                    self.model
                        .complex_types
                        .insert(synthetic_name.clone(), complex_type);
                    synthesized = Some(QName(synthetic_name));
                }
                Event::End(e) if e.local_name().as_ref() == b"element" => break,
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        Ok(synthesized)
    }
}
