//! Base job templates

/// Configuration of a freestyle project with nothing configured, as Jenkins
/// writes it for a freshly created job.
pub const EMPTY_CONFIG_XML: &str = r"<?xml version='1.0' encoding='UTF-8'?>
<project>
  <keepDependencies>false</keepDependencies>
  <properties/>
  <scm class='jenkins.scm.NullSCM'/>
  <canRoam>true</canRoam>
  <disabled>false</disabled>
  <blockBuildWhenUpstreamBuilding>false</blockBuildWhenUpstreamBuilding>
  <triggers class='vector'/>
  <concurrentBuild>false</concurrentBuild>
  <builders/>
  <publishers/>
  <buildWrappers/>
</project>";

/// Root element of a freestyle job configuration
pub const PROJECT_ROOT: &str = "project";
