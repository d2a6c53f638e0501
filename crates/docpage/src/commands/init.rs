//! Initialize a docpage project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command in the current directory.
pub async fn run(yes: bool) -> Result<()> {
    tracing::info!("Initializing docpage...");

    scaffold(Path::new("."), yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'docpage render pages/tips-and-tricks.mdx' to render the example page.");

    Ok(())
}

/// Write the starter config and example page under `root`.
///
/// Existing files are left alone unless `overwrite` is set.
fn scaffold(root: &Path, overwrite: bool) -> Result<()> {
    let config_path = root.join("docpage.toml");
    if !config_path.exists() || overwrite {
        fs::write(&config_path, DEFAULT_CONFIG).context("Failed to write docpage.toml")?;
        tracing::info!("Created docpage.toml");
    } else {
        tracing::warn!("docpage.toml already exists. Use --yes to overwrite.");
    }

    let pages_dir = root.join("pages");
    fs::create_dir_all(&pages_dir).context("Failed to create pages directory")?;

    let page_path = pages_dir.join("tips-and-tricks.mdx");
    if !page_path.exists() || overwrite {
        fs::write(&page_path, TIPS_AND_TRICKS).context("Failed to write tips-and-tricks.mdx")?;
        tracing::info!("Created pages/tips-and-tricks.mdx");
    } else {
        tracing::warn!("pages/tips-and-tricks.mdx already exists. Use --yes to overwrite.");
    }

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# docpage configuration

[site]
# Site title, shown after the page title
title = "IBM FHIR Server"

# Document language
lang = "en"

# Stylesheets linked from the layout
styles = []

[build]
# Output directory for rendered pages
output = "dist"

# Custom minijinja layout (receives title, site_title, description, tags,
# content, styles, lang)
# template = "layout.html"

# Write bare fragments instead of full documents
fragment = false

[components]
# Replace the tag of an element: wrapper, p, h1-h6, pre, code, inlineCode, a
# wrapper = { tag = "article", class = "mdx" }
# pre = { tag = "pre", class = "code-block" }
"#;

const TIPS_AND_TRICKS: &str = r#"---
title: Tips and Tricks
---

These are the tips and tricks working with the IBM FHIR Server.

# DB2 Error 42501

If you see the 42501 error in the fhir-server logs, this section walks you through how to confirm and verify the permissions:

```
42501   The authorization ID does not have the privilege to perform the specified operation on the identified object.
```

Check the Stored Procedure and object mapping

`SELECT * FROM syscat.procedures WHERE procschema = 'FHIRDATA'`

The response shows the SQL objects (third column):

```
 SCHEMA     TABLE              OBJECTNAME
 FHIRDATA   ADD_CODE_SYSTEM    SQL191105170018025        84725 BLUADMIN          2 0x38001800                             Q      2019-11-05
 FHIRDATA   ADD_PARAMETER_NAME SQL191105170018126        84726 BLUADMIN          2 0x38001800                             Q      2019-11-05
 FHIRDATA   ADD_ANY_RESOURCE   SQL191105170018328        84728 BLUADMIN          9 0x380038007c006c003c003800380018001400 Q      2019-11-05
```

Check if the FHIRSERVER user has execute privelege on the objectname.

```
select substr(authid,1,20) as authid
    , authidtype
    , privilege
    , grantable
    , substr(objectschema,1,12) as objectschema
    , substr(objectname,1,30) as objectname
    , objecttype 
from sysibmadm.privileges
where objectschema not like 'SYS%' AND AUTHID='FHIRSERVER' AND PRIVILEGE = 'EXECUTE' 
```

If missing, then you’ll want to run a grant
`GRANT EXECUTE ON PROCEDURE FHIRDATA.ADD_ANY_RESOURCE TO FHIRSERVER`

Confirm the procedure and re-execute.

<https://www.ibm.com/support/knowledgecenter/en/SSEPEK_10.0.0/seca/src/tpc/db2z_grantprivilege4executesp.html>
"#;
