/// Router Module Index
///
/// Splits the portal's HTTP surface by how access is enforced: public routes carry
/// no check, authenticated routes sit behind the `AuthUser` layer, and section
/// routes run the admin-type and permission gates per navigation.

/// Routes accessible to every client.
pub mod public;

/// Routes protected by the `AuthUser` extractor middleware.
pub mod authenticated;

/// Navigation into the brand, agency and owner sections.
pub mod sections;
