//! Parsing of XSD complexType definitions

use crate::parser::xsd::{ComplexType, Sequence};
use crate::parser::QName;
use quick_xml::events::{BytesStart, Event};
use std::error::Error;

use super::parser::SchemaParser;

impl<B: std::io::BufRead> SchemaParser<B> {
    /// Parse a <complexType> definition
    ///
    /// ComplexTypes define structured types with child elements.
    /// They can contain:
    /// - <sequence> - Ordered sequence of elements
    /// - <all> - Unordered collection of elements
    /// - <choice> - Alternative elements, tagged on the resulting elements
    /// - <complexContent><extension base="..."> - inheritance from a base
    ///   complexType, which may live in another namespace
    ///
    /// Example:
    /// ```xml
    /// <complexType name="Employee">
    ///   <complexContent>
    ///     <extension base="tns:Person">
    ///       <sequence>
    ///         <element name="employeeId" type="xs:string"/>
    ///       </sequence>
    ///     </extension>
    ///   </complexContent>
    /// </complexType>
    /// ```
    pub(super) fn parse_complex_type(&mut self, e: &BytesStart) -> Result<(), Box<dyn Error>> {
        let name = e
            .try_get_attribute("name")?
            .map(|a| a.unescape_value().unwrap().into_owned());
        let mut complex_type = ComplexType::default();
        if let Some(n) = name {
            complex_type.name = n;
        }

        self.parse_complex_type_body(&mut complex_type)?;

        if !complex_type.name.is_empty() {
            self.model
                .complex_types
                .insert(complex_type.name.clone(), complex_type);
        }
        Ok(())
    }

    /// Parse the body of a `<complexType>` element (everything between its
    /// start and end tag) into an already-named [`ComplexType`]. Shared by
    /// top-level named definitions and anonymous inline definitions nested
    /// inside a sequence element (see `sequence::parse_sequence_element`),
    /// since both forms accept the same child compositors.
    pub(super) fn parse_complex_type_body(
        &mut self,
        complex_type: &mut ComplexType,
    ) -> Result<(), Box<dyn Error>> {
        let mut buf = Vec::new();
        loop {
            match self.reader.read_event_into(&mut buf)? {
                Event::Start(e) if e.local_name().as_ref() == b"sequence" => {
                    complex_type.sequence = Some(self.parse_sequence()?);
                }
                Event::Empty(e) if e.local_name().as_ref() == b"sequence" => {
                    // Empty sequence like <xs:sequence/>
                    complex_type.sequence = Some(Sequence::default());
                }
                Event::Start(e) if e.local_name().as_ref() == b"all" => {
                    complex_type.sequence = Some(self.parse_all()?);
                }
                Event::Empty(e) if e.local_name().as_ref() == b"all" => {
                    complex_type.sequence = Some(Sequence::default());
                }
                Event::Start(e) if e.local_name().as_ref() == b"choice" => {
                    complex_type.sequence = Some(self.parse_choice()?);
                }
                Event::Empty(e) if e.local_name().as_ref() == b"choice" => {
                    complex_type.sequence = Some(Sequence::default());
                }
                Event::Start(e) if e.local_name().as_ref() == b"complexContent" => {
                    self.parse_complex_content(complex_type)?;
                }
                Event::End(e) if e.local_name().as_ref() == b"complexType" => break,
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        Ok(())
    }

    /// Parse a <complexContent> wrapper, dispatching to <extension>.
    /// <restriction> inside complexContent is uncommon in WSDL-derived
    /// schemas and is skipped rather than misread as an extension.
    fn parse_complex_content(
        &mut self,
        complex_type: &mut ComplexType,
    ) -> Result<(), Box<dyn Error>> {
        let mut buf = Vec::new();
        loop {
            match self.reader.read_event_into(&mut buf)? {
                Event::Start(e) if e.local_name().as_ref() == b"extension" => {
                    self.parse_extension(&e, complex_type)?;
                }
                Event::Start(e) if e.local_name().as_ref() == b"restriction" => {
                    self.skip_element()?;
                }
                Event::End(e) if e.local_name().as_ref() == b"complexContent" => break,
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        Ok(())
    }

    /// Parse an <extension base="..."> element within <complexContent>.
    /// The extension's own sequence holds only the elements it adds; the
    /// inherited base is recorded so the expander can walk it separately.
    fn parse_extension(
        &mut self,
        e: &BytesStart,
        complex_type: &mut ComplexType,
    ) -> Result<(), Box<dyn Error>> {
        if let Some(base) = e.try_get_attribute("base")? {
            complex_type.extension_base = Some(QName(base.unescape_value()?.into_owned()));
        }

        let mut buf = Vec::new();
        loop {
            match self.reader.read_event_into(&mut buf)? {
                Event::Start(e) if e.local_name().as_ref() == b"sequence" => {
                    complex_type.sequence = Some(self.parse_sequence()?);
                }
                Event::Empty(e) if e.local_name().as_ref() == b"sequence" => {
                    complex_type.sequence = Some(Sequence::default());
                }
                Event::Start(e) if e.local_name().as_ref() == b"all" => {
                    complex_type.sequence = Some(self.parse_all()?);
                }
                Event::Start(e) if e.local_name().as_ref() == b"choice" => {
                    complex_type.sequence = Some(self.parse_choice()?);
                }
                Event::End(e) if e.local_name().as_ref() == b"extension" => break,
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        Ok(())
    }
}
