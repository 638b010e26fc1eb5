//! End-to-end fixture-driven tests running the full ingestion pipeline
//! (`ConversionRun::convert`) against on-disk WSDL/XSD documents under
//! `testdata/`.

use soap_schema_core::diagnostic::Diagnostic;
use soap_schema_core::model::DataTypeEntry;
use soap_schema_core::{CommonApiSpec, ConversionRun, ResolutionOptions};

fn find_data_type<'a>(spec: &'a CommonApiSpec, local_name: &str) -> &'a DataTypeEntry {
    spec.data_types
        .iter()
        .find(|dt| dt.qualified_name.ends_with(&format!("#{local_name}")))
        .unwrap_or_else(|| panic!("expected a data type named {local_name}"))
}

#[test]
fn calculator_wsdl_produces_four_endpoints() {
    let spec = ConversionRun::builder()
        .wsdl_path("../testdata/wsdl/calculator.wsdl")
        .convert()
        .expect("calculator.wsdl should convert cleanly");

    assert_eq!(spec.api_name, "Calculator");
    assert_eq!(spec.base_url, "http://www.dneonline.com/calculator.asmx");
    assert_eq!(spec.endpoints.len(), 4);

    let add = spec
        .endpoints
        .iter()
        .find(|e| e.operation_name == "Add")
        .unwrap();
    assert_eq!(add.soap_action, "http://tempuri.org/Add");
    assert!(spec.processing_metadata.synthetic_soap_actions.is_empty());

    let add_request_fields: Vec<_> = add
        .request
        .all_attributes
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert!(add_request_fields.contains(&"intA"));
    assert!(add_request_fields.contains(&"intB"));
}

#[test]
fn simple_request_response_round_trips_a_single_scalar_field() {
    let spec = ConversionRun::builder()
        .wsdl_path("../testdata/wsdl/model_types.wsdl")
        .convert()
        .expect("model_types.wsdl should convert cleanly");

    let get_status = spec
        .endpoints
        .iter()
        .find(|e| e.operation_name == "GetStatus")
        .expect("GetStatus endpoint");
    assert!(get_status.request.all_attributes.is_empty());
    assert_eq!(get_status.response.all_attributes.len(), 1);
    assert_eq!(get_status.response.all_attributes[0].name, "status");
}

#[test]
fn nested_record_flattens_child_complex_type_fields() {
    let spec = ConversionRun::builder()
        .wsdl_path("../testdata/wsdl/model_types.wsdl")
        .convert()
        .expect("model_types.wsdl should convert cleanly");

    let order = find_data_type(&spec, "Order");
    let names: Vec<_> = order
        .expansion
        .attributes
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert!(names.contains(&"orderId"));
    assert!(names.contains(&"shipTo"));

    // The nested fields live under `nested_attributes`, not flattened
    // into the parent's own `attributes` list.
    let nested_names: Vec<_> = order
        .expansion
        .nested_attributes
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert!(nested_names.contains(&"street"));
    assert!(nested_names.contains(&"city"));
}

#[test]
fn single_level_inheritance_merges_base_fields() {
    let spec = ConversionRun::builder()
        .wsdl_path("../testdata/wsdl/model_types.wsdl")
        .convert()
        .expect("model_types.wsdl should convert cleanly");

    let employee = find_data_type(&spec, "Employee");
    let own: Vec<_> = employee
        .expansion
        .attributes
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    let inherited: Vec<_> = employee
        .expansion
        .inherited_attributes
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert!(own.contains(&"employeeId"));
    assert!(inherited.contains(&"name"));
}

#[test]
fn multi_level_inheritance_walks_the_whole_base_chain() {
    let spec = ConversionRun::builder()
        .wsdl_path("../testdata/wsdl/model_types.wsdl")
        .convert()
        .expect("model_types.wsdl should convert cleanly");

    let manager = find_data_type(&spec, "Manager");
    let own: Vec<_> = manager
        .expansion
        .attributes
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    let inherited: Vec<_> = manager
        .expansion
        .inherited_attributes
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert!(own.contains(&"reports"));
    assert!(inherited.contains(&"employeeId"));
    assert!(inherited.contains(&"name"));
}

#[test]
fn self_referential_type_is_bounded_by_the_recursion_depth_limit() {
    let spec = ConversionRun::builder()
        .wsdl_path("../testdata/wsdl/model_types.wsdl")
        .options(ResolutionOptions::builder().max_depth(4).build())
        .convert()
        .expect("model_types.wsdl should convert cleanly");

    let tree_node = find_data_type(&spec, "TreeNode");
    let own: Vec<_> = tree_node
        .expansion
        .attributes
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert!(own.contains(&"label"));
    assert!(own.contains(&"children"));

    // `children` recurses into TreeNode again; with max_depth(4) the chain
    // must terminate well short of the thousands of nested attributes an
    // unbounded walk would produce.
    assert!(tree_node.expansion.nested_attributes.len() < 50);
}

#[test]
fn cross_file_import_resolves_a_type_from_an_auxiliary_xsd() {
    let spec = ConversionRun::builder()
        .wsdl_path("../testdata/wsdl/imports.wsdl")
        .convert()
        .expect("imports.wsdl should convert cleanly");

    assert!(!spec.processing_metadata.files_loaded.is_empty());
    assert!(spec
        .processing_metadata
        .files_loaded
        .iter()
        .any(|f| f.ends_with("common_types.xsd")));

    let ship = spec
        .endpoints
        .iter()
        .find(|e| e.operation_name == "Ship")
        .expect("Ship endpoint");
    let request_names: Vec<_> = ship
        .request
        .all_attributes
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert!(request_names.contains(&"destination"));
    assert!(request_names.contains(&"street"));
    assert!(request_names.contains(&"city"));
}

#[test]
fn unresolved_type_reference_surfaces_a_diagnostic_without_failing_the_run() {
    let spec = ConversionRun::builder()
        .wsdl_path("../testdata/wsdl/unresolved.wsdl")
        .convert()
        .expect("an unresolved reference is a diagnostic, not a fatal error");

    assert_eq!(spec.endpoints.len(), 1);
    let has_unresolved = spec.processing_metadata.diagnostics.iter().any(|d| {
        matches!(
            d,
            Diagnostic::UnresolvedReference { qname, .. } if qname.ends_with("#MissingCriteria")
        )
    });
    assert!(
        has_unresolved,
        "expected an UnresolvedReference diagnostic for MissingCriteria"
    );
}

#[test]
fn countryinfo_wsdl_converts_end_to_end() {
    let spec = ConversionRun::builder()
        .wsdl_path("../testdata/wsdl/countryinfo.wsdl")
        .options(ResolutionOptions::builder().max_depth(6).max_cycles(3).build())
        .convert()
        .expect("countryinfo.wsdl should convert cleanly");

    assert_eq!(spec.api_name, "CountryInfoService");
    assert!(spec.endpoints.len() > 5);
    assert!(spec
        .endpoints
        .iter()
        .any(|e| e.operation_name == "ListOfCountryNamesByName"));
}
