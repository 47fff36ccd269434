//! The entity registry.
//!
//! Each management screen is the same generic CRUD page pointed at a
//! different entity: a label, a REST base path, table columns, and form
//! field descriptors. The definitions here cover the master-data, fee,
//! hostel, transport, and student screens.

use campus_erp_forms::{ChoiceOption, FieldDef, FieldKind, Rule};

use crate::table::ColumnDef;

/// Everything a CRUD page needs to manage one entity.
#[derive(Debug, Clone)]
pub struct EntityDef {
    /// Display name ("Class", "Fee Type").
    pub label: String,
    /// REST collection path relative to the API base.
    pub base_path: String,
    /// Table columns.
    pub columns: Vec<ColumnDef>,
    /// Form field descriptors.
    pub fields: Vec<FieldDef>,
}

impl EntityDef {
    fn new(
        label: &str,
        base_path: &str,
        columns: Vec<ColumnDef>,
        fields: Vec<FieldDef>,
    ) -> Self {
        Self {
            label: label.to_string(),
            base_path: base_path.to_string(),
            columns,
            fields,
        }
    }
}

/// School class.
pub fn class() -> EntityDef {
    EntityDef::new(
        "Class",
        "master/classes/",
        vec![ColumnDef::new("Class Name", "name")],
        vec![FieldDef::new("name", "Class Name", FieldKind::Text)
            .placeholder("Enter class name")
            .rule(Rule::required("Please enter class name"))],
    )
}

/// Class section.
pub fn section() -> EntityDef {
    EntityDef::new(
        "Section",
        "master/sections/",
        vec![
            ColumnDef::new("Section Name", "name"),
            ColumnDef::new("Class", "class_name"),
        ],
        vec![
            FieldDef::new("class_id", "Class", FieldKind::Select)
                .placeholder("Select a Class")
                .rule(Rule::required("Please select a class")),
            FieldDef::new("name", "Section Name", FieldKind::Text)
                .placeholder("Enter Section Name")
                .rule(Rule::required("Please enter section name")),
        ],
    )
}

/// Academic session.
pub fn session() -> EntityDef {
    EntityDef::new(
        "Session",
        "master/sessions/",
        vec![
            ColumnDef::new("Session Name", "name"),
            ColumnDef::new("Start Date", "start_date"),
            ColumnDef::new("End Date", "end_date"),
        ],
        vec![
            FieldDef::new("name", "Session Name", FieldKind::Text)
                .placeholder("Enter session name")
                .rule(Rule::required("Please enter session name")),
            FieldDef::new("start_date", "Start Date", FieldKind::Date)
                .placeholder("Select start date")
                .rule(Rule::required("Please select start date")),
            FieldDef::new("end_date", "End Date", FieldKind::Date)
                .placeholder("Select end date")
                .rule(Rule::required("Please select end date")),
        ],
    )
}

/// Student house.
pub fn house() -> EntityDef {
    EntityDef::new(
        "House",
        "student/house/",
        vec![ColumnDef::new("House Name", "name")],
        vec![FieldDef::new("name", "House Name", FieldKind::Text)
            .placeholder("Enter house name")
            .rule(Rule::required("Please enter house name"))],
    )
}

/// Fee type.
pub fn fee_type() -> EntityDef {
    EntityDef::new(
        "Fee Type",
        "master/fees/type/",
        vec![
            ColumnDef::new("Fee Type Name", "name"),
            ColumnDef::new("Fees Code", "fees_code"),
            ColumnDef::new("Description", "description"),
        ],
        vec![
            FieldDef::new("name", "Fee Type Name", FieldKind::Text)
                .placeholder("Enter fees type name")
                .rule(Rule::required("Please enter fee type name")),
            FieldDef::new("fees_code", "Fees Code", FieldKind::Text)
                .placeholder("Enter fees code")
                .rule(Rule::required("Please enter fees code")),
            FieldDef::new("description", "Description", FieldKind::Textarea)
                .placeholder("Please enter description"),
        ],
    )
}

/// Fee group.
pub fn fee_group() -> EntityDef {
    EntityDef::new(
        "Fee Group",
        "master/fees/group/",
        vec![
            ColumnDef::new("Fee Group Name", "name"),
            ColumnDef::new("Description", "description"),
        ],
        vec![
            FieldDef::new("name", "Fee Group Name", FieldKind::Text)
                .placeholder("Enter Group name")
                .rule(Rule::required("Please enter fee group name")),
            FieldDef::new("description", "Description", FieldKind::Textarea)
                .placeholder("Please enter description"),
        ],
    )
}

/// Fee discount.
pub fn fee_discount() -> EntityDef {
    EntityDef::new(
        "Fee Discount",
        "master/fees/discount/",
        vec![
            ColumnDef::new("Fee Discount Name", "name"),
            ColumnDef::new("Discount Code", "discount_code"),
            ColumnDef::new("Discount Type", "discount_type"),
            ColumnDef::new("Discount Value", "amount"),
        ],
        vec![
            FieldDef::new("name", "Fee Discount Name", FieldKind::Text)
                .placeholder("Enter discount name")
                .rule(Rule::required("Please enter discount name")),
            FieldDef::new("discount_code", "Fee Discount Code", FieldKind::Text)
                .placeholder("Enter Discount Code")
                .rule(Rule::required("Please enter discount code")),
            FieldDef::new("discount_type", "Discount Type", FieldKind::Radio)
                .option(ChoiceOption::new("Fix", "Fixed"))
                .option(ChoiceOption::new("Percentage", "Percentage"))
                .rule(Rule::required("Please select discount type")),
            FieldDef::new("amount", "Discount Value", FieldKind::Number)
                .placeholder("Enter Discount Value")
                .min(0.0)
                .rule(Rule::required("Please enter discount value")),
            FieldDef::new("description", "Description", FieldKind::Textarea)
                .placeholder("Please enter description"),
        ],
    )
}

/// Hostel.
pub fn hostel() -> EntityDef {
    EntityDef::new(
        "Hostel",
        "master/hostel/hostels/",
        vec![
            ColumnDef::new("Hostel Name", "name"),
            ColumnDef::new("Type", "hostel_type"),
            ColumnDef::new("Location", "address"),
            ColumnDef::new("Intake", "intake"),
            ColumnDef::new("Description", "description"),
        ],
        vec![
            FieldDef::new("name", "Hostel Name", FieldKind::Text)
                .placeholder("Enter Hostel Name")
                .rule(Rule::required("Please enter hostel name")),
            FieldDef::new("hostel_type", "Hostel Type", FieldKind::Select)
                .option(ChoiceOption::new("Girls", "Girls"))
                .option(ChoiceOption::new("Boys", "Boys"))
                .option(ChoiceOption::new("Common", "Common"))
                .rule(Rule::required("Please select hostel type")),
            FieldDef::new("address", "Hostel Location", FieldKind::Text)
                .placeholder("Enter Hostel Location")
                .rule(Rule::required("Please enter hostel location")),
            FieldDef::new("intake", "Intake", FieldKind::Number)
                .placeholder("Enter Intake value")
                .min(1.0)
                .rule(Rule::required("Please enter intake")),
            FieldDef::new("description", "Description", FieldKind::Textarea)
                .placeholder("Enter Description"),
        ],
    )
}

/// Hostel room type.
pub fn room_type() -> EntityDef {
    EntityDef::new(
        "Room Type",
        "master/hostel/room-types/",
        vec![ColumnDef::new("Room Type", "room_type")],
        vec![FieldDef::new("room_type", "Room Type", FieldKind::Text)
            .placeholder("Enter Room Type")
            .rule(Rule::required("Please enter room type"))],
    )
}

/// Transport vehicle.
pub fn vehicle() -> EntityDef {
    EntityDef::new(
        "Vehicle",
        "master/transport/vehicles/",
        vec![
            ColumnDef::new("Vehicle Number", "vehicle_number"),
            ColumnDef::new("Vehicle Model", "vehicle_model"),
            ColumnDef::new("Year Made", "year_made"),
            ColumnDef::new("Registration Number", "registration_number"),
            ColumnDef::new("Max Seating Capacity", "max_seating_capacity"),
            ColumnDef::new("Driver Name", "driver_name"),
            ColumnDef::new("Driver Contact No.", "driver_contact_no"),
        ],
        vec![
            FieldDef::new("vehicle_number", "Vehicle Number", FieldKind::Text)
                .placeholder("Enter Vehicle Number")
                .rule(Rule::required("Please enter vehicle number")),
            FieldDef::new("vehicle_model", "Vehicle Model", FieldKind::Text)
                .placeholder("Enter Vehicle Model")
                .rule(Rule::required("Please enter vehicle model")),
            FieldDef::new("year_made", "Year Made", FieldKind::Number)
                .placeholder("Enter Year Made")
                .min(1950.0),
            FieldDef::new("registration_number", "Registration Number", FieldKind::Text)
                .placeholder("Enter Registration Number")
                .rule(Rule::required("Please enter registration number")),
            FieldDef::new("chasis_number", "Chasis Number", FieldKind::Text)
                .placeholder("Enter Chasis Number"),
            FieldDef::new("max_seating_capacity", "Max Seating Capacity", FieldKind::Number)
                .placeholder("Enter Max Seating Capacity")
                .min(1.0),
            FieldDef::new("driver_name", "Driver Name", FieldKind::Text)
                .placeholder("Enter Driver Name"),
            FieldDef::new("driver_licence", "Driver Licence No.", FieldKind::Text)
                .placeholder("Enter Driver Licence No."),
            FieldDef::new("driver_contact_no", "Driver Contact No.", FieldKind::Text)
                .placeholder("Enter Driver Contact No."),
            FieldDef::new("note", "Note", FieldKind::Textarea)
                .placeholder("Enter Note"),
        ],
    )
}

/// Transport route.
pub fn transport_route() -> EntityDef {
    EntityDef::new(
        "Route",
        "master/transport/routes/",
        vec![ColumnDef::new("Route Name", "title")],
        vec![FieldDef::new("title", "Route Name", FieldKind::Text)
            .placeholder("Enter Route name")
            .rule(Rule::required("Please enter Route name"))],
    )
}

/// Transport pick-up point.
pub fn pick_up_point() -> EntityDef {
    EntityDef::new(
        "Pick Up Point",
        "master/transport/pickup-points/",
        vec![
            ColumnDef::new("Pickup Point Name", "pickup_point"),
            ColumnDef::new("Latitude", "latitude"),
            ColumnDef::new("Longitude", "longitude"),
        ],
        vec![
            FieldDef::new("pickup_point", "Pick up point Name", FieldKind::Text)
                .placeholder("Enter Pick up point name")
                .rule(Rule::required("Please enter pick up point name")),
            FieldDef::new("latitude", "Latitude", FieldKind::Number)
                .placeholder("Enter Latitude")
                .min(-90.0)
                .max(90.0),
            FieldDef::new("longitude", "Longitude", FieldKind::Number)
                .placeholder("Enter Longitude")
                .min(-180.0)
                .max(180.0),
        ],
    )
}

/// Student.
///
/// The registration form is much larger than the master-data screens; the
/// descriptor carries the core identity, placement, and contact fields plus
/// the photo upload.
pub fn student() -> EntityDef {
    EntityDef::new(
        "Student",
        "student/",
        vec![
            ColumnDef::new("Roll Number", "roll_number"),
            ColumnDef::new("Name", "first_name"),
            ColumnDef::new("Class", "school_class_name"),
            ColumnDef::new("Section", "section_name"),
            ColumnDef::new("Contact", "mobile_number"),
            ColumnDef::new("Email", "email"),
        ],
        vec![
            FieldDef::new("first_name", "First Name", FieldKind::Text)
                .placeholder("Enter first name")
                .rule(Rule::required("Please enter first name")),
            FieldDef::new("last_name", "Last Name", FieldKind::Text)
                .placeholder("Enter last name"),
            FieldDef::new("roll_number", "Roll Number", FieldKind::Text)
                .placeholder("Enter roll number"),
            FieldDef::new("school_class", "Class", FieldKind::Select)
                .placeholder("Select class")
                .rule(Rule::required("Please select class")),
            FieldDef::new("section", "Section", FieldKind::Select)
                .placeholder("Select section"),
            FieldDef::new("admission_date", "Admission Date", FieldKind::Date)
                .placeholder("Select admission date")
                .rule(Rule::required("Please select admission date")),
            FieldDef::new("date_of_birth", "Date of Birth", FieldKind::Date)
                .placeholder("Select date of birth"),
            FieldDef::new("gender", "Gender", FieldKind::Radio)
                .option(ChoiceOption::new("Male", "Male"))
                .option(ChoiceOption::new("Female", "Female"))
                .option(ChoiceOption::new("Other", "Other")),
            FieldDef::new("email", "Email", FieldKind::Email)
                .placeholder("Enter email")
                .rule(Rule::Email),
            FieldDef::new("mobile_number", "Mobile Number", FieldKind::Text)
                .placeholder("Enter mobile number"),
            FieldDef::new("house", "House", FieldKind::Select).placeholder("Select House"),
            FieldDef::new("current_address", "Current Address", FieldKind::Textarea)
                .placeholder("Enter current address"),
            FieldDef::new("student_photo", "Student Photo", FieldKind::File)
                .accept("image/*")
                .max_size_mb(2),
        ],
    )
}

/// All registered entities, one per management screen.
pub fn registry() -> Vec<EntityDef> {
    vec![
        class(),
        section(),
        session(),
        house(),
        fee_type(),
        fee_group(),
        fee_discount(),
        hostel(),
        room_type(),
        vehicle(),
        transport_route(),
        pick_up_point(),
        student(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_all_screens() {
        let entities = registry();
        assert_eq!(entities.len(), 13);
        // Base paths are unique and collection-shaped.
        let mut paths: Vec<_> = entities.iter().map(|e| e.base_path.clone()).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), 13);
        for entity in &entities {
            assert!(entity.base_path.ends_with('/'), "{}", entity.base_path);
            assert!(!entity.columns.is_empty(), "{}", entity.label);
            assert!(!entity.fields.is_empty(), "{}", entity.label);
        }
    }

    #[test]
    fn test_class_descriptor() {
        let class = class();
        assert_eq!(class.base_path, "master/classes/");
        assert_eq!(class.fields[0].name, "name");
        assert!(class.fields[0].is_required());
    }

    #[test]
    fn test_student_has_photo_upload() {
        let student = student();
        let photo = student
            .fields
            .iter()
            .find(|f| f.name == "student_photo")
            .unwrap();
        assert_eq!(photo.kind, campus_erp_forms::FieldKind::File);
        assert_eq!(photo.accept.as_deref(), Some("image/*"));
    }
}
